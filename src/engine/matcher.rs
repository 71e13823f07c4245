use std::collections::BTreeMap;

use crate::engine::dictionary::{Dictionary, MIN_WORD_LEN};

/// Multiset-subset relation on letters: every occurrence of a letter in
/// `candidate` must be matched to a distinct unused position in `target`.
/// Both sides are expected uppercase. Empty strings never match.
pub fn is_subword(candidate: &str, target: &str) -> bool {
    if candidate.is_empty() || target.is_empty() {
        return false;
    }
    let letters: Vec<char> = target.chars().collect();
    let mut used = vec![false; letters.len()];
    'candidate: for c in candidate.chars() {
        for (i, &t) in letters.iter().enumerate() {
            if !used[i] && t == c {
                used[i] = true;
                continue 'candidate;
            }
        }
        return false;
    }
    true
}

/// The matchable set derived for one target word: every dictionary word
/// hidden inside it, each with a found flag, plus per-length counts.
/// Created fresh for every target evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubwordResult {
    target_len: usize,
    words: BTreeMap<String, bool>,
    counts: Vec<usize>,
}

impl SubwordResult {
    pub fn new(target_len: usize) -> Self {
        Self {
            target_len,
            words: BTreeMap::new(),
            counts: vec![0; target_len + 1],
        }
    }

    fn insert(&mut self, word: &str) {
        if self.words.insert(word.to_string(), false).is_none() {
            self.counts[word.len()] += 1;
        }
    }

    pub fn target_len(&self) -> usize {
        self.target_len
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains_key(word)
    }

    pub fn is_found(&self, word: &str) -> Option<bool> {
        self.words.get(word).copied()
    }

    /// Flip a word's found flag. Returns the previous flag, or None if the
    /// word is not in the set.
    pub fn mark_found(&mut self, word: &str) -> Option<bool> {
        self.words.get_mut(word).map(|flag| {
            let prev = *flag;
            *flag = true;
            prev
        })
    }

    pub fn count_at(&self, len: usize) -> usize {
        self.counts.get(len).copied().unwrap_or(0)
    }

    pub fn found_at(&self, len: usize) -> usize {
        self.words
            .iter()
            .filter(|&(word, &found)| word.len() == len && found)
            .count()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> impl Iterator<Item = (&str, bool)> {
        self.words.iter().map(|(word, &found)| (word.as_str(), found))
    }

    /// Drop every entry shorter than the target length and zero those
    /// counts. Used by fastest-word-only modes after a target is accepted;
    /// leaving the entries with zeroed counts would let `count_at` and
    /// `mark_found` disagree.
    pub fn retain_target_length(&mut self) {
        let target_len = self.target_len;
        self.words.retain(|word, _| word.len() == target_len);
        for len in 0..target_len {
            self.counts[len] = 0;
        }
    }
}

/// Derive the full matchable set for `target`: every dictionary word no
/// longer than the target that is a multiset subset of its letters. The
/// target itself lands in its own length bucket when the dictionary
/// contains it.
pub fn match_all(dictionary: &Dictionary, target: &str) -> SubwordResult {
    let target = target.to_ascii_uppercase();
    let mut result = SubwordResult::new(target.len().max(MIN_WORD_LEN));
    for entry in dictionary.entries() {
        if entry.word.len() > target.len() {
            continue;
        }
        if is_subword(&entry.word, &target) {
            result.insert(&entry.word);
        }
    }
    result
}
