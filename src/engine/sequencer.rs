use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use thiserror::Error;

use crate::engine::dictionary::{Dictionary, MIN_WORD_LEN};
use crate::engine::matcher::{self, SubwordResult};

/// The pool was scanned end to end without finding an acceptable target.
/// Recoverable once by a dictionary reload; see `GameSession::advance`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("no playable target word left in the pool")]
pub struct NoMoreWords;

/// Deterministic target-word sequencing. Given the same seed, the same
/// start offset, and the same dictionary, `next` produces the identical
/// sequence of targets across runs; the session save format persists only
/// the seed and the cursor offset.
pub struct TargetSequencer {
    pool: Vec<String>,
    order: Vec<usize>,
    seed: u64,
    cursor: usize,
    min_len: usize,
    max_len: usize,
    capacity: usize,
}

impl TargetSequencer {
    /// Pool = the store's target-pool words filtered by length range, in
    /// file order. No playability filtering happens at build time; that is
    /// deferred to `next` so a difficulty ceiling can vary per call.
    pub fn new(dictionary: &Dictionary, min_len: usize, max_len: usize, capacity: usize) -> Self {
        let pool: Vec<String> = dictionary
            .target_pool()
            .iter()
            .filter(|word| (min_len..=max_len).contains(&word.len()))
            .cloned()
            .collect();
        let order = (0..pool.len()).collect();
        Self {
            pool,
            order,
            seed: 0,
            cursor: 0,
            min_len,
            max_len,
            capacity,
        }
    }

    /// Replace the permutation with one derived from `seed` and position
    /// the cursor at `start` (wrapping to 0 when out of bounds).
    ///
    /// StdRng is used rather than SmallRng: for a pinned rand version its
    /// stream is identical on every platform, which the resume contract
    /// depends on.
    pub fn shuffle(&mut self, seed: u64, start: usize) {
        let mut rng = StdRng::seed_from_u64(seed);
        self.order = (0..self.pool.len()).collect();
        self.order.shuffle(&mut rng);
        self.seed = seed;
        self.cursor = if start < self.order.len() { start } else { 0 };
    }

    /// Re-derive the pool after a dictionary reload and re-shuffle with the
    /// current seed, restarting from the top of the permutation.
    pub fn rebuild(&mut self, dictionary: &Dictionary) {
        let seed = self.seed;
        *self = Self::new(dictionary, self.min_len, self.max_len, self.capacity);
        self.shuffle(seed, 0);
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Cursor offset into the shuffled order; with `seed`, the save entry
    /// point for session resume.
    pub fn offset(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    /// Scan forward from the cursor, visiting each pool word at most once,
    /// for the first word whose tier is within `ceiling` and whose derived
    /// sub-word set is playable. On acceptance the cursor advances past the
    /// word and the derived set is returned for the new round.
    ///
    /// `target_only` modes strip the shorter buckets *after* acceptance;
    /// the playability scan always applies the full criterion so such modes
    /// do not shrink the eligible pool.
    pub fn next(
        &mut self,
        dictionary: &Dictionary,
        ceiling: u8,
        target_only: bool,
    ) -> Result<(String, SubwordResult), NoMoreWords> {
        let n = self.order.len();
        for step in 0..n {
            let pos = (self.cursor + step) % n;
            let word = &self.pool[self.order[pos]];
            let tier = dictionary.lookup(word).map(|e| e.tier).unwrap_or(0);
            if tier > ceiling {
                continue;
            }
            let mut result = matcher::match_all(dictionary, word);
            if !self.playable(&result) {
                continue;
            }
            if target_only {
                result.retain_target_length();
            }
            let word = word.clone();
            self.cursor = (pos + 1) % n;
            return Ok((word, result));
        }
        Err(NoMoreWords)
    }

    fn playable(&self, result: &SubwordResult) -> bool {
        is_playable(result, self.max_len, self.capacity)
    }
}

/// A round is playable when at least one bucket below the target length is
/// non-empty and no bucket overflows the on-screen capacity.
pub fn is_playable(result: &SubwordResult, target_len: usize, capacity: usize) -> bool {
    let shorter: usize = (MIN_WORD_LEN..target_len)
        .map(|len| result.count_at(len))
        .sum();
    if shorter == 0 {
        return false;
    }
    (MIN_WORD_LEN..=target_len).all(|len| result.count_at(len) <= capacity)
}
