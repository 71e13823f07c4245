use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const SCHEMA_VERSION: u32 = 1;

/// Everything needed to reproduce the remaining target-word sequence: the
/// shuffle seed and the cursor offset. The shuffled order itself is never
/// persisted.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionData {
    pub schema_version: u32,
    pub seed: u64,
    pub offset: usize,
    pub mode: String,
    pub score: u32,
    pub saved_at: DateTime<Utc>,
}

impl SessionData {
    pub fn new(seed: u64, offset: usize, mode: &str, score: u32) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            seed,
            offset,
            mode: mode.to_string(),
            score,
            saved_at: Utc::now(),
        }
    }

    /// Check if loaded data has a stale schema version and needs reset.
    pub fn needs_reset(&self) -> bool {
        self.schema_version != SCHEMA_VERSION
    }
}

/// Words the player submitted that the dictionary does not know, collected
/// as candidates for the personal-dictionary extension.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CandidateWordsData {
    #[serde(default)]
    pub words: Vec<String>,
}
