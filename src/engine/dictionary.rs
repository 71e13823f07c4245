use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::Config;

/// Words shorter than this are never playable.
pub const MIN_WORD_LEN: usize = 3;

const BUILTIN_WORDS: &str = include_str!("../../assets/words.txt");

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read dictionary source: {0}")]
    Unreadable(#[from] std::io::Error),
    #[error("dictionary source contains no usable words")]
    Empty,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DictionaryEntry {
    pub word: String,
    pub tier: u8,
    pub description: String,
    pub found: bool,
    pub personal: bool,
}

/// Where a dictionary was parsed from. Retained so `reload` can re-parse
/// the same source.
#[derive(Clone, Debug)]
pub enum WordSource {
    Builtin,
    File(PathBuf),
    Memory(String),
}

impl WordSource {
    fn read(&self) -> Result<String, LoadError> {
        match self {
            WordSource::Builtin => Ok(BUILTIN_WORDS.to_string()),
            WordSource::File(path) => Ok(fs::read_to_string(path)?),
            WordSource::Memory(text) => Ok(text.clone()),
        }
    }
}

/// Aggregate parse counters, exposed for diagnostics only. Malformed lines
/// are counted here, never surfaced as errors.
#[derive(Clone, Debug, Default)]
pub struct LoadStats {
    pub lines_seen: usize,
    pub lines_ignored: usize,
    pub tier_counts: Vec<usize>,
}

impl LoadStats {
    fn new(max_tier: u8) -> Self {
        Self {
            lines_seen: 0,
            lines_ignored: 0,
            tier_counts: vec![0; max_tier as usize + 1],
        }
    }

    /// Tiers with no words at all. A host can warn that a difficulty
    /// setting will never produce new material.
    pub fn empty_tiers(&self) -> Vec<u8> {
        self.tier_counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count == 0)
            .map(|(tier, _)| tier as u8)
            .collect()
    }

    pub fn accepted(&self) -> usize {
        self.tier_counts.iter().sum()
    }
}

pub struct Dictionary {
    source: WordSource,
    target_len: usize,
    max_tier: u8,
    entries: HashMap<String, DictionaryEntry>,
    target_pool: Vec<String>,
    stats: LoadStats,
}

impl Dictionary {
    pub fn load(source: WordSource, config: &Config) -> Result<Self, LoadError> {
        Self::load_with_personal(source, &[], config)
    }

    /// Load the main source, then run the caller's personal words through the
    /// same per-line acceptance. Personal words duplicating the main list are
    /// dropped (first occurrence wins, like any duplicate).
    pub fn load_with_personal(
        source: WordSource,
        personal: &[String],
        config: &Config,
    ) -> Result<Self, LoadError> {
        Self::build(source, personal, config.target_word_len, config.max_tier)
    }

    fn build(
        source: WordSource,
        personal: &[String],
        target_len: usize,
        max_tier: u8,
    ) -> Result<Self, LoadError> {
        let text = source.read()?;
        let mut entries = HashMap::new();
        let mut target_pool = Vec::new();
        let mut stats = LoadStats::new(max_tier);

        absorb_lines(
            &text,
            false,
            target_len,
            max_tier,
            &mut entries,
            &mut target_pool,
            &mut stats,
        );
        if !personal.is_empty() {
            let personal_text = personal.join("\n");
            absorb_lines(
                &personal_text,
                true,
                target_len,
                max_tier,
                &mut entries,
                &mut target_pool,
                &mut stats,
            );
        }

        if entries.is_empty() {
            return Err(LoadError::Empty);
        }

        Ok(Self {
            source,
            target_len,
            max_tier,
            entries,
            target_pool,
            stats,
        })
    }

    pub fn from_lines(text: &str, config: &Config) -> Result<Self, LoadError> {
        Self::load(WordSource::Memory(text.to_string()), config)
    }

    /// Re-parse the retained source, replacing all state. Callers must
    /// discard any round built from the previous state and re-supply any
    /// personal words. The old state is kept if the source has become
    /// unreadable or empty.
    pub fn reload(&mut self) -> Result<(), LoadError> {
        let fresh = Self::build(self.source.clone(), &[], self.target_len, self.max_tier)?;
        *self = fresh;
        Ok(())
    }

    pub fn lookup(&self, word: &str) -> Option<&DictionaryEntry> {
        self.entries.get(&word.to_ascii_uppercase())
    }

    /// Flip the ever-found flag on an entry. Flag-only mutation; the word
    /// map itself changes only on `reload`.
    pub fn mark_found(&mut self, word: &str) -> bool {
        match self.entries.get_mut(&word.to_ascii_uppercase()) {
            Some(entry) => {
                entry.found = true;
                true
            }
            None => false,
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = &DictionaryEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Words of exactly `target_word_len`, in file order.
    pub fn target_pool(&self) -> &[String] {
        &self.target_pool
    }

    pub fn target_len(&self) -> usize {
        self.target_len
    }

    pub fn max_tier(&self) -> u8 {
        self.max_tier
    }

    pub fn stats(&self) -> &LoadStats {
        &self.stats
    }
}

fn absorb_lines(
    text: &str,
    personal: bool,
    target_len: usize,
    max_tier: u8,
    entries: &mut HashMap<String, DictionaryEntry>,
    target_pool: &mut Vec<String>,
    stats: &mut LoadStats,
) {
    for line in text.lines() {
        stats.lines_seen += 1;

        let mut fields = line.splitn(3, '|');
        let word = clean_field(fields.next().unwrap_or("")).to_ascii_uppercase();
        let tier = parse_tier(fields.next(), max_tier);
        let description = clean_field(fields.next().unwrap_or("")).to_string();

        let len = word.len();
        if len < MIN_WORD_LEN || len > target_len {
            stats.lines_ignored += 1;
            continue;
        }
        if !word.chars().all(|c| c.is_ascii_alphabetic()) {
            stats.lines_ignored += 1;
            continue;
        }
        if entries.contains_key(&word) {
            // First occurrence wins.
            stats.lines_ignored += 1;
            continue;
        }

        stats.tier_counts[tier as usize] += 1;
        if len == target_len {
            target_pool.push(word.clone());
        }
        entries.insert(
            word.clone(),
            DictionaryEntry {
                word,
                tier,
                description,
                found: false,
                personal,
            },
        );
    }
}

fn clean_field(field: &str) -> &str {
    field.trim_matches(|c: char| c.is_whitespace() || c == '"' || c == '\'')
}

/// Out-of-range or unparseable tiers coerce to the lowest tier; the line
/// itself stays accepted.
fn parse_tier(field: Option<&str>, max_tier: u8) -> u8 {
    let Some(raw) = field else {
        return 0;
    };
    match clean_field(raw).parse::<i64>() {
        Ok(tier) if (0..=max_tier as i64).contains(&tier) => tier as u8,
        _ => 0,
    }
}
