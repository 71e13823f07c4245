use rand::RngCore;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use thiserror::Error;

use crate::config::Config;
use crate::engine::dictionary::{Dictionary, LoadError, MIN_WORD_LEN};
use crate::engine::sequencer::TargetSequencer;
use crate::session::round::{Mode, RoundState, SubmitOutcome};
use crate::session::score;
use crate::store::schema::SessionData;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("dictionary has no playable target at difficulty {ceiling} or below")]
    Exhausted { ceiling: u8 },
}

/// One play session: the dictionary, the deterministic target sequence, the
/// live round, the running score, and the sink for unknown submitted words.
/// The host drives it with `advance` / `submit` / `reveal` and persists
/// `snapshot` output between launches.
pub struct GameSession {
    mode: Mode,
    capacity: usize,
    dictionary: Dictionary,
    sequencer: TargetSequencer,
    round: Option<RoundState>,
    score: u32,
    bonus_awarded: bool,
    candidates: Vec<String>,
}

impl GameSession {
    /// Fresh session with an entropy-derived seed.
    pub fn new(config: &Config, mode: Mode) -> Result<Self, SessionError> {
        let seed = SmallRng::from_entropy().next_u64();
        Self::with_seed(config, mode, seed)
    }

    pub fn with_seed(config: &Config, mode: Mode, seed: u64) -> Result<Self, SessionError> {
        Self::build(config, mode, seed, 0, 0, &[])
    }

    /// Rebuild a persisted session: same seed and offset reproduce the
    /// remaining target sequence exactly, provided the dictionary source is
    /// unchanged.
    pub fn resume(config: &Config, data: &SessionData) -> Result<Self, SessionError> {
        Self::resume_with_personal(config, data, &[])
    }

    pub fn resume_with_personal(
        config: &Config,
        data: &SessionData,
        personal: &[String],
    ) -> Result<Self, SessionError> {
        let mode = Mode::from_key(&data.mode).unwrap_or_else(|| config.mode());
        Self::build(config, mode, data.seed, data.offset, data.score, personal)
    }

    /// Full-control constructor: accepted personal words join the dictionary
    /// before the pool is built.
    pub fn with_personal(
        config: &Config,
        mode: Mode,
        seed: u64,
        personal: &[String],
    ) -> Result<Self, SessionError> {
        Self::build(config, mode, seed, 0, 0, personal)
    }

    fn build(
        config: &Config,
        mode: Mode,
        seed: u64,
        offset: usize,
        restored_score: u32,
        personal: &[String],
    ) -> Result<Self, SessionError> {
        let dictionary = Dictionary::load_with_personal(config.word_source(), personal, config)?;
        let mut sequencer = TargetSequencer::new(
            &dictionary,
            config.target_word_len,
            config.target_word_len,
            config.column_capacity,
        );
        sequencer.shuffle(seed, offset);
        Ok(Self {
            mode,
            capacity: config.column_capacity,
            dictionary,
            sequencer,
            round: None,
            score: restored_score,
            bonus_awarded: false,
            candidates: Vec::new(),
        })
    }

    /// Move to the next playable target and install it as the live round.
    /// When the sequencer exhausts the pool, the dictionary is reloaded and
    /// the scan retried exactly once; a second exhaustion means the
    /// dictionary is too small or too strict for this ceiling.
    pub fn advance(&mut self, ceiling: u8) -> Result<&RoundState, SessionError> {
        let target_only = self.mode.target_only();
        let (word, result) = match self.sequencer.next(&self.dictionary, ceiling, target_only) {
            Ok(hit) => hit,
            Err(_) => {
                self.round = None;
                self.dictionary.reload()?;
                self.sequencer.rebuild(&self.dictionary);
                self.sequencer
                    .next(&self.dictionary, ceiling, target_only)
                    .map_err(|_| SessionError::Exhausted { ceiling })?
            }
        };
        self.bonus_awarded = false;
        let round = RoundState::new(&word, result, self.mode, self.capacity);
        Ok(self.round.insert(round))
    }

    /// Submit a word against the live round. A find scores and marks the
    /// dictionary entry as ever-found; unknown but plausible words are
    /// remembered once as personal-dictionary candidates.
    pub fn submit(&mut self, word: &str) -> SubmitOutcome {
        let Some(round) = self.round.as_mut() else {
            return SubmitOutcome::NotInSet;
        };
        let target_len = round.target().len();
        let outcome = round.submit(word);
        match outcome {
            SubmitOutcome::NewlyFound(len) => {
                self.score += score::mode_score(self.mode, len, target_len);
                if !self.bonus_awarded && round.all_found() {
                    self.score += score::all_found_bonus(target_len);
                    self.bonus_awarded = true;
                }
                self.dictionary.mark_found(word);
            }
            SubmitOutcome::AlreadyFound => {}
            SubmitOutcome::NotInSet => self.record_candidate(word),
        }
        outcome
    }

    fn record_candidate(&mut self, word: &str) {
        let word = word.trim().to_ascii_uppercase();
        let plausible = (MIN_WORD_LEN..=self.dictionary.target_len()).contains(&word.len())
            && word.chars().all(|c| c.is_ascii_alphabetic());
        // Words the dictionary already knows can reach here in modes that
        // strip shorter buckets from the round; they are not candidates.
        if plausible && self.dictionary.lookup(&word).is_none() && !self.candidates.contains(&word)
        {
            self.candidates.push(word);
        }
    }

    /// End-of-round reveal of missed words. No scoring.
    pub fn reveal(&mut self) {
        if let Some(round) = self.round.as_mut() {
            round.reveal_remaining();
        }
    }

    /// The save entry point of the resume contract.
    pub fn snapshot(&self) -> SessionData {
        SessionData::new(
            self.sequencer.seed(),
            self.sequencer.offset(),
            self.mode.as_str(),
            self.score,
        )
    }

    pub fn round(&self) -> Option<&RoundState> {
        self.round.as_ref()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }
}
