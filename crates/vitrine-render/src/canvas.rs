//! Depth-tested character canvas.

use ratatui::{
    style::Style,
    text::{Line, Span},
};
use vitrine_core::Rgb;

/// One character cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub fg: Rgb,
    pub depth: f32,
}

impl Cell {
    fn blank() -> Self {
        Self {
            ch: ' ',
            fg: Rgb::WHITE,
            depth: f32::INFINITY,
        }
    }
}

/// A grid of cells over a uniform background colour.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    width: u16,
    height: u16,
    background: Rgb,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(width: u16, height: u16, background: Rgb) -> Self {
        Self {
            width,
            height,
            background,
            cells: vec![Cell::blank(); usize::from(width) * usize::from(height)],
        }
    }

    /// Change size. Returns true if it changed.
    pub fn resize(&mut self, width: u16, height: u16) -> bool {
        if width == self.width && height == self.height {
            return false;
        }
        self.width = width;
        self.height = height;
        self.cells = vec![Cell::blank(); usize::from(width) * usize::from(height)];
        true
    }

    /// Blank every cell and set a new background.
    pub fn clear(&mut self, background: Rgb) {
        self.background = background;
        self.cells.fill(Cell::blank());
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn background(&self) -> Rgb {
        self.background
    }

    pub fn cell(&self, x: u16, y: u16) -> Option<&Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells
            .get(usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    /// Write `ch` at `(x, y)` if it is nearer than what is there.
    pub fn plot(&mut self, x: i32, y: i32, depth: f32, ch: char, fg: Rgb) -> bool {
        if x < 0 || y < 0 || x >= i32::from(self.width) || y >= i32::from(self.height) {
            return false;
        }
        let index = y as usize * usize::from(self.width) + x as usize;
        match self.cells.get_mut(index) {
            Some(cell) if depth < cell.depth => {
                *cell = Cell { ch, fg, depth };
                true
            }
            _ => false,
        }
    }

    /// Write a string left to right starting at `(x, y)`, one depth for all.
    /// Whitespace leaves the cells underneath untouched.
    pub fn text(&mut self, x: i32, y: i32, depth: f32, text: &str, fg: Rgb) {
        for (i, ch) in text.chars().enumerate() {
            if !ch.is_whitespace() {
                self.plot(x + i as i32, y, depth, ch, fg);
            }
        }
    }

    /// Number of cells holding something.
    pub fn filled(&self) -> usize {
        self.cells.iter().filter(|c| c.depth.is_finite()).count()
    }

    /// Convert to styled lines, merging runs of the same colour.
    pub fn to_lines(&self) -> Vec<Line<'static>> {
        let bg = self.background.to_color();
        let width = usize::from(self.width).max(1);
        self.cells
            .chunks(width)
            .take(usize::from(self.height))
            .map(|row| {
                let mut spans: Vec<Span<'static>> = Vec::new();
                let mut run = String::new();
                let mut run_fg = None;
                for cell in row {
                    let fg = cell.fg.to_color();
                    if run_fg.is_some_and(|c| c != fg) {
                        let style = Style::new().fg(run_fg.unwrap_or(fg)).bg(bg);
                        spans.push(Span::styled(std::mem::take(&mut run), style));
                    }
                    run_fg = Some(fg);
                    run.push(cell.ch);
                }
                if let Some(fg) = run_fg {
                    spans.push(Span::styled(run, Style::new().fg(fg).bg(bg)));
                }
                Line::from(spans)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearer_wins() {
        let mut canvas = Canvas::new(4, 2, Rgb::BLACK);
        assert!(canvas.plot(1, 1, 5.0, 'a', Rgb::WHITE));
        assert!(!canvas.plot(1, 1, 6.0, 'b', Rgb::WHITE));
        assert!(canvas.plot(1, 1, 4.0, 'c', Rgb::WHITE));
        assert_eq!(canvas.cell(1, 1).map(|c| c.ch), Some('c'));
    }

    #[test]
    fn test_out_of_bounds_is_ignored() {
        let mut canvas = Canvas::new(4, 2, Rgb::BLACK);
        assert!(!canvas.plot(-1, 0, 1.0, 'a', Rgb::WHITE));
        assert!(!canvas.plot(4, 0, 1.0, 'a', Rgb::WHITE));
        canvas.text(2, 0, 1.0, "hello", Rgb::WHITE);
        assert_eq!(canvas.filled(), 2);
    }

    #[test]
    fn test_lines_merge_colour_runs() {
        let mut canvas = Canvas::new(6, 1, Rgb::BLACK);
        canvas.text(0, 0, 1.0, "ab", Rgb::hex(0xff0000));
        let lines = canvas.to_lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].spans.len(), 2);
        assert_eq!(lines[0].spans[0].content, "ab");
        assert_eq!(lines[0].spans[1].content, "    ");
    }

    #[test]
    fn test_resize_and_clear() {
        let mut canvas = Canvas::new(2, 2, Rgb::BLACK);
        canvas.plot(0, 0, 1.0, 'x', Rgb::WHITE);
        assert!(!canvas.resize(2, 2));
        canvas.clear(Rgb::WHITE);
        assert_eq!(canvas.filled(), 0);
        assert!(canvas.resize(3, 1));
        assert_eq!(canvas.cell(2, 0).map(|c| c.ch), Some(' '));
    }
}
