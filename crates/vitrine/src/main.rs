use std::io::stdout;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use chrono::{Datelike, Local};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseEvent, MouseEventKind,
};
use ratatui::{DefaultTerminal, Frame};
use vitrine_config::Config;
use vitrine_core::Viewport;
use vitrine_render::SceneRenderer;
use vitrine_scene::{Scene, SceneOptions, SectionId};

mod logging;
mod page;

/// Rows moved per wheel notch.
const WHEEL_STEP: f32 = 3.0;
/// Upper bound on one frame's delta so a stalled terminal does not make
/// everything jump.
const MAX_DELTA: f32 = 0.25;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let config = Config::load()?;
    logging::init(&config)?;

    let terminal = ratatui::init();
    let result = crossterm::execute!(stdout(), EnableMouseCapture)
        .map_err(Into::into)
        .and_then(|()| App::new(config).run(terminal));
    let released = crossterm::execute!(stdout(), DisableMouseCapture);
    ratatui::restore();
    result?;
    released?;
    Ok(())
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    config: Config,
    scene: Scene,
    renderer: SceneRenderer,
    /// Terminal size the page was last laid out for.
    size: (u16, u16),
    started: Instant,
    last_frame: Instant,
    frame_interval: Duration,
    year: i32,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: Config) -> Self {
        let seed = config.seed.unwrap_or_else(time_seed);
        let viewport = Viewport::default();
        let layout = config.layout.resolve(viewport.width as u16);
        let options = SceneOptions {
            layout,
            theme: config.theme,
            seed,
            particle_count: config.particle_count,
            sections: page::section_heights(
                viewport.width as u16,
                viewport.height as u16,
                layout,
            ),
        };
        tracing::info!(seed, frame_rate = config.frame_rate, "starting");
        let now = Instant::now();
        Self {
            running: false,
            frame_interval: Duration::from_secs_f64(1.0 / f64::from(config.frame_rate.max(1))),
            config,
            scene: Scene::new(options, viewport),
            renderer: SceneRenderer::new(),
            size: (viewport.width as u16, viewport.height as u16),
            started: now,
            last_frame: now,
            year: Local::now().year(),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        let size = terminal.size()?;
        self.resize(size.width, size.height);
        self.running = true;
        while self.running {
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
            self.tick();
        }
        tracing::info!("exiting");
        Ok(())
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        self.renderer.render(frame, area, &self.scene);
        page::render(frame, area, &self.scene, &mut self.renderer, self.year);
    }

    /// Step the scene by the time since the previous frame.
    fn tick(&mut self) {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame).as_secs_f32().min(MAX_DELTA);
        let elapsed = now.duration_since(self.started).as_secs_f32();
        self.last_frame = now;
        self.scene.update(elapsed, delta);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits at most until the next frame is due.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        let timeout = self.frame_interval.saturating_sub(self.last_frame.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(mouse) => self.on_mouse_event(mouse),
                Event::Resize(width, height) => self.resize(width, height),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        let page = (self.scene.viewport().height - 2.0).max(1.0);
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('t')) => {
                let theme = self.scene.toggle_theme();
                tracing::info!(theme = theme.name(), "theme toggled");
            }
            (_, KeyCode::Down | KeyCode::Char('j')) => self.scroll_by(1.0),
            (_, KeyCode::Up | KeyCode::Char('k')) => self.scroll_by(-1.0),
            (_, KeyCode::PageDown | KeyCode::Char(' ')) => self.scroll_by(page),
            (_, KeyCode::PageUp) => self.scroll_by(-page),
            (_, KeyCode::Home | KeyCode::Char('g')) => self.scroll_to(0.0),
            (_, KeyCode::End | KeyCode::Char('G')) => self.scroll_to(f32::MAX),
            (_, KeyCode::Tab) => self.jump_relative(1),
            (_, KeyCode::BackTab) => self.jump_relative(-1),
            (_, KeyCode::Char(c @ '1'..='6')) => {
                let index = c as usize - '1' as usize;
                self.jump_to(SectionId::ALL[index]);
            }
            _ => {}
        }
    }

    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                self.scene
                    .pointer_moved(f32::from(mouse.column), f32::from(mouse.row));
            }
            MouseEventKind::ScrollDown => self.scroll_by(WHEEL_STEP),
            MouseEventKind::ScrollUp => self.scroll_by(-WHEEL_STEP),
            _ => {}
        }
    }

    fn resize(&mut self, width: u16, height: u16) {
        if (width, height) == self.size && self.scene.viewport() == viewport(width, height) {
            return;
        }
        tracing::debug!(width, height, "resized");
        self.size = (width, height);
        self.scene.resized(viewport(width, height));
        let layout = self.config.layout.resolve(width);
        self.scene.set_layout(layout);
        self.scene
            .relayout_sections(&page::section_heights(width, height, layout));
    }

    fn scroll_by(&mut self, rows: f32) {
        self.scene.scroll_by(rows);
    }

    fn scroll_to(&mut self, offset: f32) {
        self.scene.scrolled(offset);
    }

    fn jump_to(&mut self, id: SectionId) {
        if let Some(offset) = self.scene.scroll().offset_of(id) {
            self.scroll_to(offset);
        }
    }

    fn jump_relative(&mut self, step: isize) {
        let active = self.scene.scroll().active().unwrap_or(SectionId::Home);
        let count = SectionId::ALL.len() as isize;
        let current = SectionId::ALL
            .iter()
            .position(|&id| id == active)
            .unwrap_or(0) as isize;
        let next = (current + step).rem_euclid(count) as usize;
        self.jump_to(SectionId::ALL[next]);
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

fn viewport(width: u16, height: u16) -> Viewport {
    Viewport::new(f32::from(width), f32::from(height))
}

/// Seed from the wall clock, used when the config does not pin one.
fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        let config = Config {
            seed: Some(5),
            ..Config::default()
        };
        let mut app = App::new(config);
        app.resize(120, 30);
        app
    }

    fn press(app: &mut App, code: KeyCode) {
        app.on_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        app.running = true;
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[test]
    fn test_toggle_theme_key() {
        let mut app = app();
        let before = app.scene.theme();
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.scene.theme(), before.toggle());
    }

    #[test]
    fn test_number_keys_jump_to_sections() {
        let mut app = app();
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.scene.scroll().active(), Some(SectionId::Skills));
        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.scene.scroll().offset(), 0.0);
    }

    #[test]
    fn test_tab_walks_sections() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.scene.scroll().active(), Some(SectionId::About));
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.scene.scroll().active(), Some(SectionId::Home));
    }

    #[test]
    fn test_wheel_scrolls_and_end_clamps() {
        let mut app = app();
        app.on_mouse_event(MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(app.scene.scroll().offset(), WHEEL_STEP);
        press(&mut app, KeyCode::End);
        assert_eq!(app.scene.scroll().offset(), app.scene.scroll().max_offset());
    }

    #[test]
    fn test_narrow_terminal_switches_layout() {
        let mut app = app();
        app.resize(80, 30);
        assert_eq!(app.scene.layout(), vitrine_core::LayoutProfile::Compact);
    }
}
