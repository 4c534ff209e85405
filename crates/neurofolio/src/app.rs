use std::io::stdout;
use std::time::{Duration, Instant};

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
};
use neurofolio_background::BackgroundState;
use neurofolio_config::{Config, PageConfig};
use neurofolio_core::{Settings, SharedSettings};
use ratatui::{DefaultTerminal, Frame};
use tracing::{debug, info};

use crate::{hero, panel};

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Live background settings, written by the key handlers.
    settings: SharedSettings,
    /// Background animation state.
    background: BackgroundState,
    /// Hero overlay text.
    page: PageConfig,
    /// Input poll timeout, which also paces frames.
    frame_interval: Duration,
    /// Animation clock origin.
    started: Instant,
    show_panel: bool,
    show_hero: bool,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: &Config) -> Self {
        Self {
            running: false,
            settings: SharedSettings::new(config.background.settings),
            background: BackgroundState::new(config.background.pointer_mode),
            page: config.page.clone(),
            frame_interval: Duration::from_millis(config.background.frame_interval_ms.max(1)),
            started: Instant::now(),
            show_panel: true,
            show_hero: true,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        execute!(stdout(), EnableMouseCapture)?;
        self.running = true;
        let result = self.main_loop(&mut terminal);
        execute!(stdout(), DisableMouseCapture)?;
        info!("portfolio view closed");
        result
    }

    fn main_loop(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        while self.running {
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }
        Ok(())
    }

    fn elapsed_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let elapsed_ms = self.elapsed_ms();
        let settings = self.settings.snapshot();
        let area = frame.area();

        self.background.render(frame, &settings, elapsed_ms);
        if self.show_hero {
            hero::render(frame, area, &self.page, elapsed_ms);
        }
        panel::render(frame, area, &settings, self.show_panel);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Polls with the frame interval as timeout so the animation keeps moving.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(self.frame_interval)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(mouse) => self.on_mouse_event(mouse),
                // The next frame regenerates for the new size.
                Event::Resize(width, height) => debug!(width, height, "terminal resized"),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('+') | KeyCode::Char('=')) => self.adjust(Settings::faster),
            (_, KeyCode::Char('-') | KeyCode::Char('_')) => self.adjust(Settings::slower),
            (_, KeyCode::Char(']')) => self.adjust(Settings::more_layers),
            (_, KeyCode::Char('[')) => self.adjust(Settings::fewer_layers),
            (_, KeyCode::Char('.')) => self.adjust(Settings::denser),
            (_, KeyCode::Char(',')) => self.adjust(Settings::sparser),
            (_, KeyCode::Char('a')) => self.adjust(|s| s.style = s.style.toggle()),
            (_, KeyCode::Char('o')) => self.adjust(|s| s.layout = s.layout.toggle()),
            (_, KeyCode::Char('p')) => self.show_panel = !self.show_panel,
            (_, KeyCode::Char('h')) => self.show_hero = !self.show_hero,
            _ => {}
        }
    }

    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        if let MouseEventKind::Moved | MouseEventKind::Drag(_) = mouse.kind {
            self.background.pointer_moved(mouse.column, mouse.row);
        }
    }

    /// Apply a settings change and log the result.
    fn adjust(&mut self, change: impl FnOnce(&mut Settings)) {
        let s = self.settings.update(change);
        debug!(
            speed = s.speed,
            layers = s.layers,
            density = s.density,
            style = s.style.label(),
            layout = s.layout.label(),
            "settings changed"
        );
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
