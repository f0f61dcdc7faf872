use crate::error::Result;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Running { started_at: Instant },
    Finished { elapsed: Duration },
}

/// Keys that reset the session instead of being typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKey {
    /// Start over on the same target.
    Retry,
    /// Start over on a freshly picked target.
    Next,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchReport {
    /// Number of leading characters that match the target.
    pub match_prefix_len: usize,
    pub is_complete: bool,
}

impl MatchReport {
    /// True while every typed character is part of the matching prefix.
    pub fn is_on_track(&self, typed_len: usize) -> bool {
        self.match_prefix_len == typed_len
    }
}

/// One attempt at typing one target word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingSession {
    target: String,
    typed: String,
    state: SessionState,
}

impl TypingSession {
    pub fn start(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            typed: String::new(),
            state: SessionState::Idle,
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn typed(&self) -> &str {
        &self.typed
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, SessionState::Idle)
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, SessionState::Running { .. })
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, SessionState::Finished { .. })
    }

    /// A typing keystroke; the first one starts the clock.
    pub fn on_keystroke_at(&mut self, now: Instant) {
        if self.is_idle() {
            self.state = SessionState::Running { started_at: now };
        }
    }

    pub fn on_keystroke(&mut self) {
        self.on_keystroke_at(Instant::now())
    }

    /// Observe the current contents of the input field.
    ///
    /// Once finished the typed text and elapsed time are frozen and further
    /// changes are ignored.
    pub fn on_text_changed_at(&mut self, text: &str, now: Instant) -> MatchReport {
        if self.is_finished() {
            return self.report();
        }

        self.typed = text.to_string();
        let report = self.report();

        if report.is_complete {
            if let SessionState::Running { started_at } = self.state {
                let elapsed = now.saturating_duration_since(started_at);
                self.state = SessionState::Finished { elapsed };
            }
        }

        report
    }

    pub fn on_text_changed(&mut self, text: &str) -> MatchReport {
        self.on_text_changed_at(text, Instant::now())
    }

    pub fn report(&self) -> MatchReport {
        MatchReport {
            match_prefix_len: match_prefix_len(&self.typed, &self.target),
            is_complete: self.typed == self.target,
        }
    }

    /// Whether Retry/Next are honored right now.
    pub fn accepts_control_keys(&self) -> bool {
        !self.is_running()
    }

    /// Returns the replacement session for `key`, or `None` while running.
    ///
    /// `next_target` is only consulted for [`ControlKey::Next`].
    pub fn on_control_key<F>(
        &self,
        key: ControlKey,
        next_target: F,
    ) -> Result<Option<TypingSession>>
    where
        F: FnOnce() -> Result<String>,
    {
        if !self.accepts_control_keys() {
            return Ok(None);
        }

        let target = match key {
            ControlKey::Retry => self.target.clone(),
            ControlKey::Next => next_target()?,
        };
        Ok(Some(TypingSession::start(target)))
    }

    /// Elapsed time for display.
    pub fn tick_at(&self, now: Instant) -> Duration {
        match self.state {
            SessionState::Idle => Duration::ZERO,
            SessionState::Running { started_at } => now.saturating_duration_since(started_at),
            SessionState::Finished { elapsed } => elapsed,
        }
    }

    pub fn tick(&self) -> Duration {
        self.tick_at(Instant::now())
    }
}

/// Length in characters of the longest common prefix of `typed` and `target`.
pub fn match_prefix_len(typed: &str, target: &str) -> usize {
    typed
        .chars()
        .zip(target.chars())
        .take_while(|(a, b)| a == b)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn start_is_idle_and_empty() {
        let s = TypingSession::start("Pisica");
        assert_eq!(s.target(), "Pisica");
        assert_eq!(s.typed(), "");
        assert_eq!(s.state(), SessionState::Idle);
        assert_eq!(s.tick(), Duration::ZERO);
    }

    #[test]
    fn first_keystroke_starts_the_clock() {
        let t0 = Instant::now();
        let mut s = TypingSession::start("Da");
        s.on_keystroke_at(t0);
        assert_eq!(s.state(), SessionState::Running { started_at: t0 });

        // later keystrokes do not restart it
        s.on_keystroke_at(t0 + ms(500));
        assert_eq!(s.state(), SessionState::Running { started_at: t0 });
        assert_eq!(s.tick_at(t0 + ms(750)), ms(750));
    }

    #[test]
    fn typing_pisica() {
        let t0 = Instant::now();
        let mut s = TypingSession::start("Pisica");

        s.on_keystroke_at(t0);
        let r = s.on_text_changed_at("Pisi", t0 + ms(400));
        assert_eq!(r.match_prefix_len, 4);
        assert!(!r.is_complete);
        assert!(s.is_running());

        let r = s.on_text_changed_at("Pisica", t0 + ms(1234));
        assert!(r.is_complete);
        assert_eq!(r.match_prefix_len, 6);
        assert_eq!(s.state(), SessionState::Finished { elapsed: ms(1234) });
        assert_eq!(s.tick_at(t0 + ms(9000)), ms(1234));
    }

    #[test]
    fn completion_is_case_sensitive_and_untrimmed() {
        let t0 = Instant::now();
        let mut s = TypingSession::start("Salut");
        s.on_keystroke_at(t0);

        assert!(!s.on_text_changed_at("salut", t0).is_complete);
        assert!(!s.on_text_changed_at("Salut ", t0).is_complete);
        assert!(!s.on_text_changed_at(" Salut", t0).is_complete);
        assert!(s.is_running());
        assert!(s.on_text_changed_at("Salut", t0 + ms(10)).is_complete);
        assert!(s.is_finished());
    }

    #[test]
    fn prefix_stops_at_first_mismatch() {
        assert_eq!(match_prefix_len("", "abc"), 0);
        assert_eq!(match_prefix_len("abx", "abc"), 2);
        assert_eq!(match_prefix_len("xbc", "abc"), 0);
        assert_eq!(match_prefix_len("abcdef", "abc"), 3);
        assert_eq!(match_prefix_len("ab", "abc"), 2);
    }

    #[test]
    fn prefix_counts_characters_not_bytes() {
        assert_eq!(match_prefix_len("Țară", "Țară"), 4);
        assert_eq!(match_prefix_len("Țx", "Țară"), 1);
    }

    #[test]
    fn prefix_never_exceeds_shorter_input() {
        let target = "Dumnezeu";
        let inputs = ["", "D", "Dum", "Dumnezeu", "Dumnezeuuuu", "dumnezeu", "Dxmnezeu"];
        for typed in inputs {
            let len = match_prefix_len(typed, target);
            assert!(len <= typed.chars().count().min(target.chars().count()));
        }
    }

    #[test]
    fn single_char_mutation_bounds_prefix() {
        let target = "Laringe";
        let typed = "Laringe";
        let before = match_prefix_len(typed, target);
        for i in 0..typed.len() {
            let mut chars: Vec<char> = typed.chars().collect();
            chars[i] = '#';
            let mutated: String = chars.into_iter().collect();
            let after = match_prefix_len(&mutated, target);
            assert_eq!(after, i.min(before));
        }
    }

    #[test]
    fn completion_without_keystroke_does_not_finish() {
        // text can only change through a keystroke in the app; a bare change
        // leaves the clock untouched
        let mut s = TypingSession::start("A");
        let r = s.on_text_changed_at("A", Instant::now());
        assert!(r.is_complete);
        assert!(s.is_idle());
    }

    #[test]
    fn finished_session_ignores_further_input() {
        let t0 = Instant::now();
        let mut s = TypingSession::start("Nu");
        s.on_keystroke_at(t0);
        s.on_text_changed_at("Nu", t0 + ms(300));

        s.on_keystroke_at(t0 + ms(400));
        let r = s.on_text_changed_at("Nux", t0 + ms(500));

        assert!(r.is_complete);
        assert_eq!(s.typed(), "Nu");
        assert_eq!(s.state(), SessionState::Finished { elapsed: ms(300) });
    }

    #[test]
    fn elapsed_is_monotonic_while_running_and_frozen_after() {
        let t0 = Instant::now();
        let mut s = TypingSession::start("Repede");
        s.on_keystroke_at(t0);

        let mut last = Duration::ZERO;
        for step in 0..20 {
            let now = t0 + ms(step * 10);
            let e = s.tick_at(now);
            assert!(e >= last);
            last = e;
        }

        s.on_text_changed_at("Repede", t0 + ms(250));
        for step in 0..20 {
            assert_eq!(s.tick_at(t0 + ms(300 + step * 100)), ms(250));
        }
    }

    #[test]
    fn retry_while_idle_resets_same_target() {
        let mut s = TypingSession::start("Ce");
        s.on_text_changed_at("C", Instant::now());

        let fresh = s
            .on_control_key(ControlKey::Retry, || unreachable!("retry keeps target"))
            .unwrap()
            .unwrap();

        assert_eq!(fresh.target(), "Ce");
        assert_eq!(fresh.typed(), "");
        assert_eq!(fresh.tick(), Duration::ZERO);
        assert_eq!(fresh.state(), SessionState::Idle);
    }

    #[test]
    fn next_after_finish_uses_new_target() {
        let t0 = Instant::now();
        let mut s = TypingSession::start("Da");
        s.on_keystroke_at(t0);
        s.on_text_changed_at("Da", t0 + ms(100));

        let fresh = s
            .on_control_key(ControlKey::Next, || Ok("Strain".to_string()))
            .unwrap()
            .unwrap();

        assert_eq!(fresh.target(), "Strain");
        assert!(fresh.is_idle());
    }

    #[test]
    fn control_keys_ignored_while_running() {
        let t0 = Instant::now();
        let mut s = TypingSession::start("Mihaela");
        s.on_keystroke_at(t0);
        s.on_text_changed_at("Mi", t0 + ms(50));

        assert!(!s.accepts_control_keys());
        assert_matches!(s.on_control_key(ControlKey::Next, || Ok("Nu".into())), Ok(None));
        assert_matches!(s.on_control_key(ControlKey::Retry, || Ok("Nu".into())), Ok(None));
        assert_eq!(s.typed(), "Mi");
        assert_eq!(s.state(), SessionState::Running { started_at: t0 });
    }

    #[test]
    fn wall_clock_wrappers() {
        let mut s = TypingSession::start("Da");
        s.on_keystroke();
        assert!(s.is_running());
        assert!(!s.on_text_changed("D").is_complete);
        assert!(s.on_text_changed("Da").is_complete);
        let frozen = s.tick();
        std::thread::sleep(ms(5));
        assert_eq!(s.tick(), frozen);
    }

    #[test]
    fn failed_pick_is_propagated() {
        let s = TypingSession::start("Da");
        let result = s.on_control_key(ControlKey::Next, || {
            Err(crate::error::TimeMeError::InvalidState("word list is empty".into()))
        });
        assert_matches!(result, Err(crate::error::TimeMeError::InvalidState(_)));
    }

    #[test]
    fn on_track_tracks_whole_input() {
        let mut s = TypingSession::start("Salut");
        assert!(s.on_text_changed_at("", Instant::now()).is_on_track(0));
        assert!(s.on_text_changed_at("Sa", Instant::now()).is_on_track(2));
        assert!(!s.on_text_changed_at("Sx", Instant::now()).is_on_track(2));
    }
}
