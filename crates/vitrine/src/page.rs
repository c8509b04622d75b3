//! Page content, section layout, navbar and footer.
//!
//! Section heights are measured from the wrapped text at the current width
//! and handed to the scene's scroll tracker; drawing then places each
//! section at `top - offset` and clips it to the screen.

use ratatui::{
    Frame,
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use vitrine_core::{LayoutProfile, Rgb, Theme};
use vitrine_render::SceneRenderer;
use vitrine_scene::{Scene, SectionId};

/// Rows of padding above and below each section's text.
const SECTION_PADDING: u16 = 2;
/// Height of a model panel stacked under the text in compact layout.
const COMPACT_PANEL_HEIGHT: u16 = 10;
/// Tallest model panel beside the text in desktop layout.
const DESKTOP_PANEL_HEIGHT: u16 = 18;

/// Text colours for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub primary: Color,
    pub bar: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                text: Rgb::hex(0xf1f5f9).to_color(),
                muted: Rgb::hex(0x94a3b8).to_color(),
                accent: Rgb::hex(0x80ffdb).to_color(),
                primary: Rgb::hex(0x9d6bff).to_color(),
                bar: Rgb::hex(0x2a1d57).to_color(),
            },
            Theme::Light => Self {
                text: Rgb::hex(0x1a1138).to_color(),
                muted: Rgb::hex(0x64748b).to_color(),
                accent: Rgb::hex(0x0f9f76).to_color(),
                primary: Rgb::hex(0x5b21b6).to_color(),
                bar: Rgb::hex(0xe2e8f0).to_color(),
            },
        }
    }
}

/// One logical row of section copy, before wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Row {
    Kicker(&'static str),
    Title(&'static str),
    Text(&'static str),
    Entry(&'static str, &'static str),
    Blank,
}

fn content(id: SectionId) -> &'static [Row] {
    use Row::*;
    match id {
        SectionId::Home => &[
            Kicker("Hello, I'm"),
            Title("Pratik Raj"),
            Text("Software Developer"),
            Blank,
            Text(
                "I build exceptional digital experiences with clean code and innovative \
                 solutions, specializing in modern web technologies.",
            ),
            Blank,
            Text("[ View Portfolio ]   [ Download CV ]"),
        ],
        SectionId::About => &[
            Kicker("About Me"),
            Title("Know more about me"),
            Blank,
            Entry("5+", "Years of Experience"),
            Entry("100+", "Projects Completed"),
            Entry("50+", "Satisfied Clients"),
            Entry("24/7", "Support Available"),
        ],
        SectionId::Skills => &[
            Kicker("My Skills"),
            Title("Technologies I work with"),
            Blank,
            Entry("Frontend", "React, TypeScript, Three.js, Tailwind CSS"),
            Entry("Backend", "Node.js, Express, PostgreSQL, MongoDB"),
            Entry("Tooling", "Git, Docker, CI/CD, AWS"),
        ],
        SectionId::Projects => &[
            Kicker("Portfolio"),
            Title("Recent projects"),
            Blank,
            Entry(
                "E-commerce Dashboard",
                "Analytics, inventory management and sales tracking.",
            ),
            Entry(
                "Travel Companion App",
                "Plan trips, find attractions and share experiences.",
            ),
            Entry(
                "3D Product Configurator",
                "Interactive 3D product customization for online stores.",
            ),
            Entry(
                "Fitness Tracking App",
                "Workouts, nutrition and personal fitness goals.",
            ),
        ],
        SectionId::Resume => &[
            Kicker("Resume"),
            Title("Experience"),
            Blank,
            Entry(
                "Senior Software Developer",
                "TechCorp Solutions, 2022 - Present",
            ),
            Entry("Full Stack Developer", "Digital Innovations, 2020 - 2022"),
            Entry("Frontend Developer", "WebCreations Inc., 2018 - 2020"),
        ],
        SectionId::Contact => &[
            Kicker("Contact"),
            Title("Get in touch"),
            Blank,
            Entry("Email", "pratik.raj@example.com"),
            Entry("Phone", "+1 (555) 123-4567"),
            Entry("Location", "San Francisco, CA"),
        ],
    }
}

/// Greedy word wrap to `width` columns.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn section_lines(id: SectionId, width: usize, palette: &Palette) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for row in content(id) {
        match *row {
            Row::Kicker(text) => lines.push(Line::styled(text, Style::new().fg(palette.accent))),
            Row::Title(text) => lines.extend(wrap(text, width).into_iter().map(|l| {
                Line::styled(l, Style::new().fg(palette.text).add_modifier(Modifier::BOLD))
            })),
            Row::Text(text) => lines.extend(
                wrap(text, width)
                    .into_iter()
                    .map(|l| Line::styled(l, Style::new().fg(palette.muted))),
            ),
            Row::Entry(head, detail) => {
                lines.push(Line::from(vec![
                    Span::styled("▸ ", Style::new().fg(palette.primary)),
                    Span::styled(head, Style::new().fg(palette.text).add_modifier(Modifier::BOLD)),
                ]));
                lines.extend(
                    wrap(detail, width.saturating_sub(2))
                        .into_iter()
                        .map(|l| Line::styled(format!("  {l}"), Style::new().fg(palette.muted))),
                );
            }
            Row::Blank => lines.push(Line::default()),
        }
    }
    lines
}

/// Where text and model panels go for a given screen width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Columns {
    pub text_x: u16,
    pub text_width: u16,
    /// Model panel column and width; `None` stacks the panel under the text.
    pub panel: Option<(u16, u16)>,
}

impl Columns {
    pub fn for_width(width: u16, layout: LayoutProfile) -> Self {
        match layout {
            LayoutProfile::Desktop => {
                let text_width = ((u32::from(width) * 3 / 5) as u16).saturating_sub(4).max(1);
                let panel_x = text_width + 6;
                Self {
                    text_x: 3,
                    text_width,
                    panel: Some((panel_x, width.saturating_sub(panel_x + 2))),
                }
            }
            LayoutProfile::Compact => Self {
                text_x: 2,
                text_width: width.saturating_sub(4).max(1),
                panel: None,
            },
        }
    }
}

/// Section heights for the scroll tracker.
pub fn section_heights(width: u16, height: u16, layout: LayoutProfile) -> Vec<(SectionId, f32)> {
    let columns = Columns::for_width(width, layout);
    let palette = Palette::for_theme(Theme::Dark);
    SectionId::ALL
        .iter()
        .map(|&id| {
            let text = section_lines(id, usize::from(columns.text_width), &palette).len() as u16;
            let mut rows = text + SECTION_PADDING * 2;
            if id.model().is_some() {
                rows = match columns.panel {
                    Some(_) => rows.max(DESKTOP_PANEL_HEIGHT + 2),
                    None => rows + COMPACT_PANEL_HEIGHT,
                };
            }
            if id == SectionId::Home {
                rows = rows.max(height);
            }
            if id == SectionId::Contact {
                rows += 2;
            }
            (id, f32::from(rows))
        })
        .collect()
}

/// Draw the sections, navbar and footer over the scene.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    scene: &Scene,
    renderer: &mut SceneRenderer,
    year: i32,
) {
    let palette = Palette::for_theme(scene.theme());
    let scroll = scene.scroll();
    let offset = scroll.offset().round() as i32;
    let columns = Columns::for_width(area.width, scene.layout());

    for span in scroll.spans() {
        let top = span.top.round() as i32 - offset;
        let height = span.height.round() as i32;
        if top + height <= 0 || top >= i32::from(area.height) {
            continue;
        }

        let mut text_rows = 0;
        if scroll.is_text_revealed(span.id) {
            let lines = section_lines(span.id, usize::from(columns.text_width), &palette);
            text_rows = lines.len() as i32;
            for (i, line) in lines.iter().enumerate() {
                let y = top + i32::from(SECTION_PADDING) + i as i32;
                put_line(frame.buffer_mut(), area, columns.text_x, y, line, columns.text_width);
            }
        }

        if let Some(model) = scene.model(span.id)
            && scroll.is_model_revealed(span.id)
        {
            let (x, width, y, rows) = match columns.panel {
                Some((x, width)) => (x, width, top + 1, DESKTOP_PANEL_HEIGHT.min(height as u16)),
                None => (
                    columns.text_x,
                    columns.text_width,
                    top + i32::from(SECTION_PADDING) + text_rows,
                    COMPACT_PANEL_HEIGHT,
                ),
            };
            let canvas = renderer.rasterize_model(width, rows, model, scene.backdrop());
            for (i, line) in canvas.to_lines().iter().enumerate() {
                put_line(frame.buffer_mut(), area, x, y + i as i32, line, width);
            }
        }

        if span.id == SectionId::Contact {
            let footer = Line::from(vec![
                Span::styled(format!("© {year} Pratik Raj. "), Style::new().fg(palette.muted)),
                Span::styled("All rights reserved.", Style::new().fg(palette.muted)),
            ]);
            put_line(frame.buffer_mut(), area, columns.text_x, top + height - 1, &footer, area.width);
        }
    }

    render_navbar(frame.buffer_mut(), area, scene, &palette);
    render_help(frame.buffer_mut(), area, &palette);
}

fn put_line(buf: &mut Buffer, area: Rect, x: u16, y: i32, line: &Line, width: u16) {
    if y < 0 || y >= i32::from(area.height) || x >= area.width {
        return;
    }
    let width = width.min(area.width - x);
    buf.set_line(area.x + x, area.y + y as u16, line, width);
}

fn render_navbar(buf: &mut Buffer, area: Rect, scene: &Scene, palette: &Palette) {
    if area.height == 0 {
        return;
    }
    let scroll = scene.scroll();
    let active = scroll.active();
    let bar = Rect::new(area.x, area.y, area.width, 1);
    if scroll.is_navbar_scrolled() {
        buf.set_style(bar, Style::new().bg(palette.bar));
    }

    let mut spans = vec![Span::styled(
        " vitrine ",
        Style::new().fg(palette.accent).add_modifier(Modifier::BOLD),
    )];
    for (i, id) in SectionId::ALL.iter().enumerate() {
        let style = if Some(*id) == active {
            Style::new().fg(palette.accent).add_modifier(Modifier::UNDERLINED)
        } else {
            Style::new().fg(palette.text)
        };
        spans.push(Span::styled(format!(" {}:", i + 1), Style::new().fg(palette.muted)));
        spans.push(Span::styled(id.title(), style));
    }
    buf.set_line(bar.x, bar.y, &Line::from(spans), bar.width);

    let indicator = match scene.theme() {
        Theme::Dark => " ☾ dark ",
        Theme::Light => " ☀ light ",
    };
    let len = indicator.chars().count() as u16;
    if area.width > len {
        buf.set_string(
            area.x + area.width - len,
            area.y,
            indicator,
            Style::new().fg(palette.primary),
        );
    }
}

fn render_help(buf: &mut Buffer, area: Rect, palette: &Palette) {
    if area.height < 2 {
        return;
    }
    let help = Line::from(vec![
        Span::styled("q", Style::new().fg(palette.accent).add_modifier(Modifier::BOLD)),
        Span::styled(" quit  ", Style::new().fg(palette.muted)),
        Span::styled("t", Style::new().fg(palette.accent).add_modifier(Modifier::BOLD)),
        Span::styled(" theme  ", Style::new().fg(palette.muted)),
        Span::styled("↑↓", Style::new().fg(palette.accent).add_modifier(Modifier::BOLD)),
        Span::styled(" scroll  ", Style::new().fg(palette.muted)),
        Span::styled("1-6", Style::new().fg(palette.accent).add_modifier(Modifier::BOLD)),
        Span::styled(" jump", Style::new().fg(palette.muted)),
    ])
    .centered();
    let row = Rect::new(area.x, area.y + area.height - 1, area.width, 1);
    ratatui::widgets::Widget::render(help, row, buf);
}
