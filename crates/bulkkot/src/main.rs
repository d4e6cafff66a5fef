use std::time::Duration;

use bulkkot_config::Config;
use bulkkot_core::{EffectKind, Rng};
use bulkkot_engine::{Canvas, FireworksEngine, Snowfield};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::Stylize,
    text::Line,
    widgets::Paragraph,
};

/// Frame pacing for the animation loop (roughly 30 fps).
const FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Step applied to the snow pool size by the +/- keys.
const FLAKE_STEP: usize = 25;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let config = Config::load()?;
    let terminal = ratatui::init();
    let result = App::new(config).run(terminal);
    ratatui::restore();
    result
}

/// The main application which holds the state and logic of the application.
pub struct App {
    /// Is the application running?
    running: bool,
    /// Currently shown effect.
    effect: EffectKind,
    /// Off-screen surface both effects draw onto.
    canvas: Canvas,
    fireworks: FireworksEngine,
    snow: Snowfield,
    rng: Rng,
}

impl App {
    /// Construct a new instance of [`App`]. The surfaces start with zero
    /// area; the first frame resizes them to the terminal.
    pub fn new(config: Config) -> Self {
        let mut rng = Rng::new();
        let fireworks = FireworksEngine::new(config.fireworks, 0, 0);
        let snow = Snowfield::new(config.snow, 0, 0, &mut rng);
        Self {
            running: false,
            effect: config.effect,
            canvas: Canvas::new(0, 0),
            fireworks,
            snow,
            rng,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        self.fireworks.start(&mut self.rng);
        self.snow.start();
        while self.running {
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }
        Ok(())
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::vertical([
            Constraint::Fill(1),   // Animation stage
            Constraint::Length(1), // Help text
        ])
        .split(frame.area());
        let stage = chunks[0];

        // One terminal row holds two half-block pixels.
        let width = stage.width;
        let height = stage.height.saturating_mul(2);
        if width != self.canvas.width() || height != self.canvas.height() {
            self.canvas.resize(width, height);
            self.fireworks.resize(width, height);
            self.snow.resize(width, height, &mut self.rng);
        }

        match self.effect {
            EffectKind::Fireworks => self.fireworks.advance(&mut self.canvas, &mut self.rng),
            EffectKind::Snowfall => self.snow.advance(&mut self.canvas, &mut self.rng),
        }
        frame.render_widget(Paragraph::new(self.canvas.to_lines()), stage);

        let help = Line::from(vec![
            "q".bold().cyan(),
            " quit  ".dark_gray(),
            "space".bold().cyan(),
            " launch  ".dark_gray(),
            "e".bold().cyan(),
            " effect  ".dark_gray(),
            "s".bold().cyan(),
            " pause  ".dark_gray(),
            "c".bold().cyan(),
            " clear  ".dark_gray(),
            "+/-".bold().cyan(),
            " flakes  ".dark_gray(),
            self.effect.label().bold().dark_gray(),
        ])
        .centered();
        frame.render_widget(help, chunks[1]);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Uses polling with timeout so the animation keeps advancing.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(FRAME_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(_) => {}
                Event::Resize(_, _) => {}
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
            (_, KeyCode::Char(' ')) => self.launch(),
            (_, KeyCode::Char('e')) => self.effect = self.effect.toggle(),
            (_, KeyCode::Char('s')) => self.toggle_pause(),
            (_, KeyCode::Char('c')) => self.clear(),
            (_, KeyCode::Char('+') | KeyCode::Char('=')) => self.adjust_flakes(FLAKE_STEP as isize),
            (_, KeyCode::Char('-')) => self.adjust_flakes(-(FLAKE_STEP as isize)),
            _ => {}
        }
    }

    /// Queue an extra shell (fireworks only).
    fn launch(&mut self) {
        if self.effect == EffectKind::Fireworks {
            self.fireworks.launch(1);
        }
    }

    /// Toggle the active effect between running and frozen.
    fn toggle_pause(&mut self) {
        match self.effect {
            EffectKind::Fireworks => {
                if self.fireworks.is_running() {
                    self.fireworks.stop();
                } else {
                    self.fireworks.start(&mut self.rng);
                }
            }
            EffectKind::Snowfall => {
                if self.snow.is_running() {
                    self.snow.stop();
                } else {
                    self.snow.start();
                }
            }
        }
    }

    /// Discard the active effect's entities and blank the surface.
    fn clear(&mut self) {
        match self.effect {
            EffectKind::Fireworks => self.fireworks.clear(&mut self.canvas),
            EffectKind::Snowfall => self.snow.clear(&mut self.canvas),
        }
    }

    /// Grow or shrink the snow pool (snowfall only).
    fn adjust_flakes(&mut self, step: isize) {
        if self.effect != EffectKind::Snowfall {
            return;
        }
        let count = self.snow.count().saturating_add_signed(step);
        self.snow.set_count(count, &mut self.rng);
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
