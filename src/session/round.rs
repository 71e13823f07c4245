use crate::engine::dictionary::MIN_WORD_LEN;
use crate::engine::matcher::SubwordResult;

/// Game mode, selecting which length buckets count toward completion and
/// score. Stored in config as its string key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Classic,
    SpeedTarget,
    TimeTrial,
    Arcade,
}

impl Mode {
    pub const ALL: &'static [Mode] =
        &[Mode::Classic, Mode::SpeedTarget, Mode::TimeTrial, Mode::Arcade];

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Classic => "classic",
            Mode::SpeedTarget => "speed-target",
            Mode::TimeTrial => "time-trial",
            Mode::Arcade => "arcade",
        }
    }

    pub fn from_key(key: &str) -> Option<Mode> {
        Mode::ALL.iter().copied().find(|mode| mode.as_str() == key)
    }

    /// Fastest-word-only play: only the full-length target matters, the
    /// shorter buckets are stripped from the round after target acceptance.
    pub fn target_only(self) -> bool {
        matches!(self, Mode::SpeedTarget)
    }

    pub fn counts_length(self, len: usize, target_len: usize) -> bool {
        if self.target_only() {
            len == target_len
        } else {
            true
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    NewlyFound(usize),
    AlreadyFound,
    NotInSet,
}

/// State for one round: the target word, its derived sub-word set with
/// found flags, and the rules for judging completion. Replaced wholesale
/// when the sequencer advances.
pub struct RoundState {
    target: String,
    words: SubwordResult,
    mode: Mode,
    capacity: usize,
}

impl RoundState {
    pub fn new(target: &str, words: SubwordResult, mode: Mode, capacity: usize) -> Self {
        Self {
            target: target.to_ascii_uppercase(),
            words,
            mode,
            capacity,
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn submit(&mut self, word: &str) -> SubmitOutcome {
        let word = word.to_ascii_uppercase();
        match self.words.mark_found(&word) {
            None => SubmitOutcome::NotInSet,
            Some(true) => SubmitOutcome::AlreadyFound,
            Some(false) => SubmitOutcome::NewlyFound(word.len()),
        }
    }

    pub fn count_at_length(&self, len: usize) -> usize {
        self.words.count_at(len)
    }

    pub fn count_found_at_length(&self, len: usize) -> usize {
        self.words.found_at(len)
    }

    /// True when every counted bucket is complete. Buckets wider than the
    /// on-screen capacity only require capacity-worth of finds, mirroring
    /// the sequencer's acceptance rule.
    pub fn all_found(&self) -> bool {
        (MIN_WORD_LEN..=self.words.target_len())
            .filter(|&len| self.mode.counts_length(len, self.words.target_len()))
            .all(|len| {
                let need = self.words.count_at(len).min(self.capacity);
                self.words.found_at(len) >= need
            })
    }

    /// Flag every unfound word found, without scoring. Idempotent; used for
    /// the end-of-round reveal of missed words.
    pub fn reveal_remaining(&mut self) {
        let unfound: Vec<String> = self
            .words
            .words()
            .filter(|(_, found)| !found)
            .map(|(word, _)| word.to_string())
            .collect();
        for word in unfound {
            self.words.mark_found(&word);
        }
    }

    pub fn words(&self) -> impl Iterator<Item = (&str, bool)> {
        self.words.words()
    }

    pub fn total_words(&self) -> usize {
        self.words.len()
    }

    pub fn found_words(&self) -> usize {
        self.words.words().filter(|(_, found)| *found).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::engine::dictionary::Dictionary;
    use crate::engine::matcher;

    fn round(text: &str, target: &str, mode: Mode, capacity: usize) -> RoundState {
        let dict = Dictionary::from_lines(text, &Config::default()).unwrap();
        let words = matcher::match_all(&dict, target);
        RoundState::new(target, words, mode, capacity)
    }

    fn classic_round() -> RoundState {
        round("PLANET\nPLAN\nNET\nTAN", "PLANET", Mode::Classic, 8)
    }

    #[test]
    fn test_submit_state_machine() {
        let mut round = classic_round();
        assert_eq!(round.submit("net"), SubmitOutcome::NewlyFound(3));
        assert_eq!(round.submit("NET"), SubmitOutcome::AlreadyFound);
        for _ in 0..3 {
            assert_eq!(round.submit("ZEBRA"), SubmitOutcome::NotInSet);
        }
    }

    #[test]
    fn test_counts_track_submissions() {
        let mut round = classic_round();
        assert_eq!(round.count_at_length(3), 2);
        assert_eq!(round.count_found_at_length(3), 0);
        round.submit("TAN");
        assert_eq!(round.count_found_at_length(3), 1);
        assert_eq!(round.count_at_length(3), 2);
    }

    #[test]
    fn test_all_found_requires_every_bucket() {
        let mut round = classic_round();
        round.submit("NET");
        round.submit("TAN");
        round.submit("PLAN");
        assert!(!round.all_found());
        round.submit("PLANET");
        assert!(round.all_found());
    }

    #[test]
    fn test_all_found_capped_by_capacity() {
        // Three 3-letter words but a display capacity of 2: finding any two
        // completes the bucket.
        let mut round = round("PLANET\nNET\nTAN\nTEN", "PLANET", Mode::Classic, 2);
        round.submit("PLANET");
        round.submit("NET");
        assert!(!round.all_found());
        round.submit("TAN");
        assert!(round.all_found());
    }

    #[test]
    fn test_speed_target_ignores_shorter_buckets() {
        let mut round = round("PLANET\nNET\nTAN", "PLANET", Mode::SpeedTarget, 8);
        assert!(!round.all_found());
        round.submit("PLANET");
        assert!(round.all_found());
    }

    #[test]
    fn test_reveal_remaining_is_idempotent() {
        let mut round = classic_round();
        round.submit("NET");
        round.reveal_remaining();
        assert!(round.all_found());
        assert_eq!(round.found_words(), round.total_words());
        round.reveal_remaining();
        assert!(round.all_found());
        assert_eq!(round.found_words(), round.total_words());
    }

    #[test]
    fn test_mode_keys_round_trip() {
        for &mode in Mode::ALL {
            assert_eq!(Mode::from_key(mode.as_str()), Some(mode));
        }
        assert_eq!(Mode::from_key("bogus"), None);
    }

    #[test]
    fn test_counts_length_selection() {
        assert!(Mode::Classic.counts_length(3, 6));
        assert!(Mode::Arcade.counts_length(4, 6));
        assert!(!Mode::SpeedTarget.counts_length(3, 6));
        assert!(Mode::SpeedTarget.counts_length(6, 6));
    }
}
