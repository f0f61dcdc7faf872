//! Glue between terminal key events, the typing session and the word store.
//!
//! The [`App`] owns the single current [`TypingSession`], the text buffers
//! backing the input field and the word list editor, and the display state
//! the UI renders. It holds no rules of its own beyond dispatch and
//! formatting.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::config::Config;
use crate::error::{Result, TimeMeError};
use crate::runtime::RefreshTimer;
use crate::session::{ControlKey, TypingSession};
use crate::word_store::{editor_text, parse_word_list, FileWordStore, WordPicker, WordStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum View {
    Practice,
    Configuration,
}

impl View {
    pub fn toggled(self) -> Self {
        match self {
            View::Practice => View::Configuration,
            View::Configuration => View::Practice,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputColor {
    Affirmative,
    Negative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

/// What the event loop should do after an event was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Seconds rounded to hundredths, ties away from zero.
fn centiseconds(elapsed: Duration) -> f64 {
    (elapsed.as_secs_f64() * 100.0).round() / 100.0
}

pub fn format_elapsed(elapsed: Duration) -> String {
    format!("Time: {:.2} seconds", centiseconds(elapsed))
}

pub fn format_result(elapsed: Duration) -> String {
    format!(
        "You typed the word correctly in {:.2} seconds.",
        centiseconds(elapsed)
    )
}

pub fn format_prompt(target: &str) -> String {
    format!("Type the following word: {target}")
}

pub struct App {
    store: Box<dyn WordStore>,
    picker: WordPicker,
    words: Vec<String>,
    session: Option<TypingSession>,
    input: String,
    input_color: InputColor,
    editor: String,
    view: View,
    timer: RefreshTimer,
    displayed_elapsed: Duration,
    notification: Option<Notification>,
}

impl App {
    /// Loads the word list and picks the first target. Failures are shown
    /// as a notification rather than aborting.
    pub fn new(store: Box<dyn WordStore>, picker: WordPicker) -> Self {
        let mut app = Self {
            store,
            picker,
            words: Vec::new(),
            session: None,
            input: String::new(),
            input_color: InputColor::Affirmative,
            editor: String::new(),
            view: View::Practice,
            timer: RefreshTimer::default(),
            displayed_elapsed: Duration::ZERO,
            notification: None,
        };

        match app.store.load() {
            Ok(words) => app.words = words,
            Err(e) => app.report_error(e),
        }
        if !app.words.is_empty() {
            app.new_word();
        } else if app.notification.is_none() {
            app.report_error(TimeMeError::InvalidState(
                "word list is empty, add words in the Configuration tab".into(),
            ));
        }

        app
    }

    pub fn from_config(config: &Config) -> Self {
        let store = FileWordStore::with_path(config.words_path());
        Self::new(Box::new(store), WordPicker::new(config.seed))
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn session(&self) -> Option<&TypingSession> {
        self.session.as_ref()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn input_color(&self) -> InputColor {
        self.input_color
    }

    pub fn editor(&self) -> &str {
        &self.editor
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn timer(&self) -> &RefreshTimer {
        &self.timer
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn prompt_text(&self) -> String {
        match &self.session {
            Some(session) => format_prompt(session.target()),
            None => "No words to type.".to_string(),
        }
    }

    /// Elapsed-time label; blank once the word has been completed.
    pub fn timer_text(&self) -> String {
        match &self.session {
            Some(session) if session.is_finished() => String::new(),
            _ => format_elapsed(self.displayed_elapsed),
        }
    }

    pub fn result_text(&self) -> String {
        match &self.session {
            Some(session) if session.is_finished() => format_result(session.tick()),
            _ => String::new(),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Flow {
        self.handle_key_at(key, Instant::now())
    }

    pub fn handle_key_at(&mut self, key: KeyEvent, now: Instant) -> Flow {
        if key.kind == KeyEventKind::Release {
            return Flow::Continue;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return Flow::Quit,
            KeyCode::Char('c') if ctrl => return Flow::Quit,
            KeyCode::Tab => self.select_view(self.view.toggled()),
            KeyCode::Char('n') if ctrl => self.new_word(),
            KeyCode::Char('s') if ctrl => {
                if self.view == View::Configuration {
                    self.save_word_list();
                }
            }
            _ => match self.view {
                View::Practice => self.handle_practice_key(key, now),
                View::Configuration => self.handle_editor_key(key),
            },
        }

        Flow::Continue
    }

    fn handle_practice_key(&mut self, key: KeyEvent, now: Instant) {
        let finished = self.session.as_ref().is_some_and(|s| s.is_finished());
        match key.code {
            KeyCode::Left => {
                self.control_key(ControlKey::Retry);
            }
            KeyCode::Right => {
                self.control_key(ControlKey::Next);
            }
            KeyCode::Char('r' | 'R') if finished => {
                self.control_key(ControlKey::Retry);
            }
            KeyCode::Char('n' | 'N') if finished => {
                self.control_key(ControlKey::Next);
            }
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.type_char_at(c, now)
            }
            KeyCode::Backspace => self.backspace_at(now),
            _ => {}
        }
    }

    fn handle_editor_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.editor.push(c)
            }
            KeyCode::Backspace => {
                self.editor.pop();
            }
            _ => {}
        }
    }

    pub fn type_char_at(&mut self, c: char, now: Instant) {
        self.edit_input(now, |input| input.push(c));
    }

    pub fn backspace_at(&mut self, now: Instant) {
        self.edit_input(now, |input| {
            input.pop();
        });
    }

    fn edit_input<F: FnOnce(&mut String)>(&mut self, now: Instant, edit: F) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.is_finished() {
            return;
        }

        if session.is_idle() {
            session.on_keystroke_at(now);
            self.timer.arm();
            tracing::debug!(target_word = session.target(), "session started");
        }

        edit(&mut self.input);
        let report = session.on_text_changed_at(&self.input, now);

        self.input_color = if report.is_on_track(self.input.chars().count()) {
            InputColor::Affirmative
        } else {
            InputColor::Negative
        };

        if session.is_finished() {
            self.timer.disarm();
            self.displayed_elapsed = session.tick_at(now);
            tracing::info!(
                target_word = session.target(),
                elapsed_secs = self.displayed_elapsed.as_secs_f64(),
                "word completed"
            );
        }
    }

    /// Periodic refresh of the elapsed-time label.
    pub fn on_tick_at(&mut self, now: Instant) {
        if let Some(session) = &self.session {
            if session.is_running() {
                self.displayed_elapsed = session.tick_at(now);
            }
        }
    }

    pub fn on_tick(&mut self) {
        self.on_tick_at(Instant::now())
    }

    /// Applies Retry/Next. Returns false when the key was not honored
    /// because the session is running.
    pub fn control_key(&mut self, key: ControlKey) -> bool {
        let Some(session) = &self.session else {
            return false;
        };
        let (picker, words) = (&mut self.picker, &self.words);

        match session.on_control_key(key, || picker.pick(words)) {
            Ok(Some(fresh)) => {
                self.replace_session(fresh);
                true
            }
            Ok(None) => false,
            Err(e) => {
                self.report_error(e);
                true
            }
        }
    }

    /// The "New word" action: always available, whatever the session state.
    pub fn new_word(&mut self) {
        match self.picker.pick(&self.words) {
            Ok(word) => self.replace_session(TypingSession::start(word)),
            Err(e) => self.report_error(e),
        }
    }

    fn replace_session(&mut self, session: TypingSession) {
        tracing::debug!(target_word = session.target(), "new session");
        self.session = Some(session);
        self.input.clear();
        self.input_color = InputColor::Affirmative;
        self.timer.disarm();
        self.displayed_elapsed = Duration::ZERO;
        self.notification = None;
    }

    pub fn select_view(&mut self, view: View) {
        if view == View::Configuration && self.view != View::Configuration {
            self.editor = editor_text(&self.words);
        }
        self.view = view;
    }

    /// Replaces the word list with the editor contents and persists it.
    pub fn save_word_list(&mut self) {
        match self.try_save_word_list() {
            Ok(count) => {
                if self.session.is_none() {
                    self.new_word();
                }
                self.notification = Some(Notification {
                    kind: NotificationKind::Info,
                    message: format!("Saved {count} words"),
                });
            }
            Err(e) => self.report_error(e),
        }
    }

    fn try_save_word_list(&mut self) -> Result<usize> {
        let words = parse_word_list(&self.editor);
        if words.is_empty() {
            return Err(TimeMeError::InvalidState(
                "word list must contain at least one word".into(),
            ));
        }
        self.store.save(&words)?;
        self.words = words;
        Ok(self.words.len())
    }

    fn report_error(&mut self, e: TimeMeError) {
        tracing::warn!(error = %e, "operation failed");
        self.notification = Some(Notification {
            kind: NotificationKind::Error,
            message: e.to_string(),
        });
    }
}
