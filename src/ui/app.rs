//! Main TUI application state and logic

use crate::playback::PlaybackState;
use crate::session::Session;
use crate::ui::panes::{self, SourceScrollState, StatusRenderData};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::warn;

/// Speed change per `+` / `-` press
const SPEED_STEP: f64 = 0.25;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Model,
    Log,
}

impl FocusedPane {
    /// Move focus to the next pane (source -> model -> log)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Model,
            FocusedPane::Model => FocusedPane::Log,
            FocusedPane::Log => FocusedPane::Source,
        }
    }
}

/// The main application state
pub struct App {
    pub session: Session,

    /// File the snippet was loaded from; `r` re-reads it before running
    pub source_path: Option<PathBuf>,

    pub focused_pane: FocusedPane,

    pub source_scroll: SourceScrollState,
    pub model_scroll: usize,
    pub log_scroll: usize,

    pub should_quit: bool,

    pub status_message: String,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    /// Create an app around a session whose source is already set
    pub fn new(session: Session, source_path: Option<PathBuf>) -> Self {
        App {
            session,
            source_path,
            focused_pane: FocusedPane::Source,
            source_scroll: SourceScrollState::default(),
            model_scroll: 0,
            log_scroll: usize::MAX,
            should_quit: false,
            status_message: String::from("Ready!"),
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or_else(Instant::now),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.session.poll(Instant::now());
            if self.session.state() == PlaybackState::AtEnd && self.status_message == "Playing..." {
                self.status_message = "Playback complete".to_string();
                self.log_scroll = usize::MAX;
            }

            // Use poll with timeout to allow auto-play to work
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(main_chunks[0]);

        // Left column: Source (top) | Log (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(columns[0]);

        let current = self.session.current_snapshot();
        let source = self.session.source();

        panes::render_source_pane(
            frame,
            left_rows[0],
            &source.text,
            source.language,
            current.as_ref().map_or(0, |c| c.source_line),
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        panes::render_log_pane(
            frame,
            left_rows[1],
            self.session.log(),
            self.session.errors(),
            self.focused_pane == FocusedPane::Log,
            &mut self.log_scroll,
        );

        panes::render_model_pane(
            frame,
            columns[1],
            self.session.run().map(|run| run.kind),
            current.as_ref(),
            self.focused_pane == FocusedPane::Model,
            &mut self.model_scroll,
        );

        let playback = self.session.playback();
        panes::render_status_bar(
            frame,
            main_chunks[1],
            &StatusRenderData {
                message: &self.status_message,
                current_step: playback.cursor(),
                total_steps: playback.timeline().len(),
                state: playback.state(),
                speed: playback.speed(),
                has_error: !self.session.errors().is_empty(),
            },
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            // Number keys step forward N times directly
            KeyCode::Char(c @ '1'..='9') => {
                let n = c.to_digit(10).unwrap_or(1) as usize;
                let target = self.session.playback().cursor() + n;
                self.session.seek(target);
                self.status_message = format!(
                    "Jumped to step {}",
                    self.session.playback().cursor() + 1
                );
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Left => {
                self.session.step_backward();
                self.status_message = "Stepped backward".to_string();
            }
            KeyCode::Right => {
                self.session.step_forward();
                self.status_message = "Stepped forward".to_string();
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Source => {
                    // Scrolling up makes the current line move down visually
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_add(1));
                    }
                }
                FocusedPane::Model => {
                    self.model_scroll = self.model_scroll.saturating_sub(1);
                }
                FocusedPane::Log => {
                    self.log_scroll = self.log_scroll.saturating_sub(1);
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Source => {
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_sub(1));
                    }
                }
                FocusedPane::Model => {
                    self.model_scroll = self.model_scroll.saturating_add(1);
                }
                FocusedPane::Log => {
                    self.log_scroll = self.log_scroll.saturating_add(1);
                }
            },
            KeyCode::Char(' ') => {
                // Toggle auto-play (with 200ms debounce to prevent key repeat spam)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.toggle_play();
                }
            }
            KeyCode::Char('+') | KeyCode::Char('=') => self.change_speed(SPEED_STEP),
            KeyCode::Char('-') => self.change_speed(-SPEED_STEP),
            KeyCode::Enter => {
                self.session.seek(usize::MAX);
                self.status_message = "Jumped to end".to_string();
            }
            KeyCode::Backspace => {
                self.session.seek(0);
                self.status_message = "Jumped to start".to_string();
            }
            KeyCode::Char('r') | KeyCode::Char('R') => self.rerun(),
            KeyCode::Char('x') | KeyCode::Char('X') => {
                self.session.reset();
                self.status_message = "Session reset".to_string();
                self.log_scroll = usize::MAX;
            }
            _ => {}
        }
    }

    fn toggle_play(&mut self) {
        if self.session.playback().is_playing() {
            self.session.pause();
            self.status_message = "Paused".to_string();
        } else if self.session.play(Instant::now()) {
            self.status_message = "Playing...".to_string();
        } else {
            self.status_message = "Nothing left to play".to_string();
        }
    }

    fn change_speed(&mut self, delta: f64) {
        let wanted = self.session.playback().speed() + delta;
        self.status_message = match self.session.set_speed(wanted) {
            Ok(applied) => format!("Speed {:.2}x", applied),
            Err(e) => e.to_string(),
        };
    }

    /// Re-read the snippet from disk (when it came from a file) and execute it
    fn rerun(&mut self) {
        if let Some(path) = &self.source_path {
            match fs::read_to_string(path) {
                Ok(text) => {
                    let language = self.session.source().language;
                    self.session.set_source(text, language);
                }
                Err(e) => {
                    warn!("Could not re-read {}: {}", path.display(), e);
                    self.status_message = format!("Could not read {}: {}", path.display(), e);
                    return;
                }
            }
        }

        self.status_message = match self.session.execute() {
            Ok(run) => format!("Ran {} operations on a {}", run.operations.len(), run.kind),
            Err(e) => format!("Run failed: {}", e),
        };
        self.source_scroll = SourceScrollState::default();
        self.log_scroll = usize::MAX;
    }
}
