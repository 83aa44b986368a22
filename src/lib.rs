//! scanview
//!
//! Terminal viewer for identity-scan CSV exports. One file is read in a
//! single shot, parsed into header-keyed records (the `payload` column is
//! decoded as JSON, the `scanreference` identifier is extracted from the
//! first row), and presented as a searchable table with per-row payload
//! expand/collapse.
//!
//! Architecture: pure core (`parser`, `model`, `state`) / impure shell
//! (`source`, `view`, `logging`, `config`).

pub mod config;
pub mod logging;
pub mod model;
pub mod parser;
pub mod source;
pub mod state;
pub mod view;
