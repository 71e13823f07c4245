pub mod dictionary;
pub mod matcher;
pub mod sequencer;

pub use dictionary::{Dictionary, DictionaryEntry, LoadError, WordSource};
pub use matcher::SubwordResult;
pub use sequencer::{NoMoreWords, TargetSequencer};
