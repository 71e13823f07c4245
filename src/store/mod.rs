pub mod json_store;
pub mod schema;

pub use json_store::SessionStore;
pub use schema::{CandidateWordsData, SessionData};
