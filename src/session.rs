//! Session orchestration
//!
//! A [`Session`] owns everything one user works with: the current
//! [`SourceProgram`], the latest [`Run`], the [`PlaybackController`] holding its
//! timeline, an ordered execution log and the list of surfaced errors.
//!
//! # Execute
//!
//! ```text
//! source → detect → extract → simulate → playback.load
//! ```
//!
//! An execute either replaces the previous run completely or, when the
//! language has no grammar for the detected structure, leaves no run at all.
//! There is never a partial timeline.

use crate::config::PlaybackConfig;
use crate::error::{Error, Result};
use crate::model::ModelState;
use crate::parser::{detect, extract, DsaKind, Language, Operation};
use crate::playback::{PlaybackController, PlaybackState, TickOutcome};
use crate::simulator::simulate;
use crate::snapshot::Timeline;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Instant;
use tracing::{error, info, warn};

/// Snippet text plus its declared language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceProgram {
    pub text: String,
    pub language: Language,
}

/// Result of one successful execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub kind: DsaKind,
    pub operations: Vec<Operation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

/// One line of the execution log
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
}

/// A user-facing error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorEntry {
    pub message: String,
    pub source_line: Option<usize>,
}

/// What the presentation layer needs to draw the current step
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentSnapshot<'a> {
    pub index: usize,
    pub total: usize,
    pub operation_name: &'static str,
    pub operation: &'a Operation,
    pub source_line: usize,
    pub model: &'a ModelState,
    pub effect: &'a str,
    pub timestamp: DateTime<Utc>,
}

/// Serializable view of a whole run
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub language: Language,
    pub kind: DsaKind,
    pub operations: &'a [Operation],
    pub timeline: &'a Timeline,
}

pub struct Session {
    source: SourceProgram,
    run: Option<Run>,
    playback: PlaybackController,
    log: Vec<LogEntry>,
    errors: Vec<ErrorEntry>,
}

impl Session {
    pub fn new(config: &PlaybackConfig) -> Self {
        let mut playback = PlaybackController::new(config.base_tick());
        if let Err(e) = playback.set_speed(config.speed) {
            warn!("Ignoring configured speed: {}", e);
        }
        Session {
            source: SourceProgram {
                text: String::new(),
                language: Language::Java,
            },
            run: None,
            playback,
            log: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Replace the source program. Takes effect on the next [`execute`](Self::execute).
    pub fn set_source(&mut self, text: impl Into<String>, language: Language) {
        self.source = SourceProgram {
            text: text.into(),
            language,
        };
    }

    pub fn source(&self) -> &SourceProgram {
        &self.source
    }

    /// Turn the current source into a fresh run and load its timeline.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedLanguage`] when the declared language has no
    /// grammar for the detected data structure. The previous run is discarded
    /// either way.
    pub fn execute(&mut self) -> Result<&Run> {
        let language = self.source.language;
        self.errors.clear();
        self.run = None;
        self.record(
            LogLevel::Info,
            format!(
                "Executing {} snippet ({} lines)",
                language,
                self.source.text.lines().count()
            ),
        );

        let kind = detect(&self.source.text);
        let operations = match extract(&self.source.text, language, kind) {
            Ok(operations) => operations,
            Err(e) => {
                self.playback.reset();
                self.errors.push(ErrorEntry {
                    message: e.to_string(),
                    source_line: None,
                });
                self.record(LogLevel::Error, format!("Run failed: {}", e));
                return Err(e);
            }
        };

        let timeline = simulate(kind, &operations);
        self.playback.load(timeline);
        if operations.is_empty() {
            self.record(
                LogLevel::Warn,
                format!("Run completed: {} detected, no operations recognized", kind),
            );
        } else {
            self.record(
                LogLevel::Info,
                format!(
                    "Run completed: {} detected, {} operations",
                    kind,
                    operations.len()
                ),
            );
        }

        Ok(self.run.insert(Run { kind, operations }))
    }

    /// Discard the run, its timeline and any errors
    pub fn reset(&mut self) {
        self.run = None;
        self.errors.clear();
        self.playback.reset();
        self.record(LogLevel::Info, "Session reset".to_string());
    }

    pub fn run(&self) -> Option<&Run> {
        self.run.as_ref()
    }

    pub fn playback(&self) -> &PlaybackController {
        &self.playback
    }

    pub fn play(&mut self, now: Instant) -> bool {
        self.playback.play(now)
    }

    pub fn pause(&mut self) {
        self.playback.pause();
    }

    pub fn step_forward(&mut self) {
        self.playback.step_forward();
    }

    pub fn step_backward(&mut self) {
        self.playback.step_backward();
    }

    pub fn seek(&mut self, index: usize) {
        self.playback.seek(index);
    }

    pub fn set_speed(&mut self, multiplier: f64) -> Result<f64> {
        self.playback.set_speed(multiplier)
    }

    /// Drive the playback loop; call regularly from the event loop
    pub fn poll(&mut self, now: Instant) -> TickOutcome {
        let outcome = self.playback.poll(now);
        if let TickOutcome::ReachedEnd(index) = outcome {
            self.record(
                LogLevel::Info,
                format!("Playback reached end at step {}", index + 1),
            );
        }
        outcome
    }

    pub fn state(&self) -> PlaybackState {
        self.playback.state()
    }

    pub fn current_snapshot(&self) -> Option<CurrentSnapshot<'_>> {
        let snapshot = self.playback.current()?;
        Some(CurrentSnapshot {
            index: self.playback.cursor(),
            total: self.playback.timeline().len(),
            operation_name: snapshot.operation.kind.name(),
            operation: &snapshot.operation,
            source_line: snapshot.source_line,
            model: &snapshot.model,
            effect: &snapshot.effect,
            timestamp: snapshot.timestamp,
        })
    }

    pub fn report(&self) -> Option<RunReport<'_>> {
        let run = self.run.as_ref()?;
        Some(RunReport {
            language: self.source.language,
            kind: run.kind,
            operations: &run.operations,
            timeline: self.playback.timeline(),
        })
    }

    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    pub fn errors(&self) -> &[ErrorEntry] {
        &self.errors
    }

    fn record(&mut self, level: LogLevel, message: String) {
        match level {
            LogLevel::Info => info!("{}", message),
            LogLevel::Warn => warn!("{}", message),
            LogLevel::Error => error!("{}", message),
        }
        self.log.push(LogEntry {
            timestamp: Utc::now(),
            level,
            message,
        });
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(&PlaybackConfig::default())
    }
}

/// Whether an error came from the snippet rather than the environment
pub fn is_snippet_error(err: &Error) -> bool {
    matches!(err, Error::UnsupportedLanguage { .. })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(text: &str, language: Language) -> Session {
        let mut session = Session::default();
        session.set_source(text, language);
        session
    }

    #[test]
    fn test_execute_loads_timeline() {
        let mut session = session("push(10)\npush(20)\npop()", Language::Java);
        let run = session.execute().unwrap();
        assert_eq!(run.kind, DsaKind::Stack);
        assert_eq!(run.operations.len(), 3);

        assert_eq!(session.state(), PlaybackState::Paused);
        let current = session.current_snapshot().unwrap();
        assert_eq!(current.index, 0);
        assert_eq!(current.total, 3);
        assert_eq!(current.operation_name, "push");
        assert_eq!(current.source_line, 1);
    }

    #[test]
    fn test_unsupported_language_leaves_no_timeline() {
        let mut session = session("s.push(1)", Language::Java);
        session.execute().unwrap();

        session.set_source("d = dict()\nd.pop('a')", Language::Python);
        let err = session.execute().unwrap_err();
        assert!(is_snippet_error(&err));
        assert!(session.run().is_none());
        assert!(session.current_snapshot().is_none());
        assert_eq!(session.state(), PlaybackState::Idle);
        assert_eq!(session.errors().len(), 1);
        assert!(session.errors()[0].message.contains("Python"));
        assert_eq!(session.errors()[0].source_line, None);
    }

    #[test]
    fn test_log_has_attempt_and_outcome() {
        let mut session = session("s.push(1)", Language::Java);
        session.execute().unwrap();
        let messages: Vec<&str> = session.log().iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages.len(), 2);
        assert!(messages[0].starts_with("Executing Java snippet"));
        assert!(messages[1].starts_with("Run completed"));
    }

    #[test]
    fn test_playback_end_is_logged() {
        let mut session = session("s.push(1)\ns.push(2)", Language::Java);
        session.execute().unwrap();
        let now = Instant::now();
        assert!(session.play(now));
        let tick = session.playback().pending_tick().unwrap();
        assert_eq!(session.poll(tick.due()), TickOutcome::ReachedEnd(1));
        assert_eq!(session.state(), PlaybackState::AtEnd);
        let last = session.log().last().unwrap();
        assert_eq!(last.message, "Playback reached end at step 2");
    }

    #[test]
    fn test_reset_clears_run_and_errors() {
        let mut session = session("m = dict()\nm.pop('a')", Language::Python);
        let _ = session.execute();
        assert!(!session.errors().is_empty());

        session.reset();
        assert!(session.errors().is_empty());
        assert!(session.run().is_none());
        assert_eq!(session.state(), PlaybackState::Idle);
        assert_eq!(session.log().last().unwrap().message, "Session reset");
    }

    #[test]
    fn test_next_execute_replaces_run() {
        let mut session = session("s.push(1)\ns.push(2)\ns.push(3)", Language::Java);
        session.execute().unwrap();
        session.seek(2);

        session.set_source("q.offer(1)", Language::Java);
        let run = session.execute().unwrap();
        assert_eq!(run.kind, DsaKind::Queue);
        assert_eq!(session.playback().cursor(), 0);
        assert_eq!(session.playback().timeline().len(), 1);
    }

    #[test]
    fn test_configured_speed() {
        let config = PlaybackConfig {
            base_tick_ms: 1000,
            speed: 2.0,
        };
        let session = Session::new(&config);
        assert_eq!(
            session.playback().tick_delay(),
            std::time::Duration::from_millis(500)
        );

        let bad = PlaybackConfig {
            base_tick_ms: 1000,
            speed: -1.0,
        };
        assert_eq!(Session::new(&bad).playback().speed(), 1.0);
    }

    #[test]
    fn test_report_serializes() {
        let mut session = session("s.push(1)", Language::Java);
        assert!(session.report().is_none());
        session.execute().unwrap();
        let json = serde_json::to_value(session.report().unwrap()).unwrap();
        assert_eq!(json["kind"], "stack");
        assert_eq!(json["language"], "java");
        assert_eq!(json["operations"][0]["kind"], "push");
        assert_eq!(json["timeline"][0]["model"]["items"][0], 1);
    }
}
