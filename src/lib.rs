// Word-puzzle engine core: dictionary loading, hidden-word derivation,
// deterministic round sequencing, and per-round found-word tracking.
// Presentation (rendering, input, audio) lives in host programs; the only
// binary here is the `dictcheck` word-list validator.

pub mod config;
pub mod engine;
pub mod session;
pub mod store;
