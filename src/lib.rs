pub mod config;
pub mod csv;
pub mod domain;
pub mod error;
pub mod session;
pub mod store;
pub mod theme;

pub use domain::import::{summarize, ImportSummary, Importer};
pub use domain::recipient::{ImportRow, RowStatus};
