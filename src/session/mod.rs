pub mod game;
pub mod round;
pub mod score;

pub use game::{GameSession, SessionError};
pub use round::{Mode, RoundState, SubmitOutcome};
