//! Session state (pure core).
//!
//! [`AppState`] is an explicit snapshot of everything scoped to "this loaded
//! file": the parse product, the search query, and the expansion set. Every
//! mutation entry point replaces part of the snapshot through a pure
//! transform; the presentation layer only reads.

pub mod app_state;
pub mod expand;
pub mod search;

pub use app_state::AppState;
pub use expand::ExpansionSet;
pub use search::record_matches;
