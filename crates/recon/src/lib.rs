//! `orderrecon-recon`: order-level reconciliation between two datasets.
//!
//! Pure engine crate: receives matrices or projected records, returns
//! classified items, a summary and a delimited report. No CLI or IO
//! dependencies.

pub mod aggregate;
pub mod classify;
pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod matcher;
pub mod model;
pub mod records;
pub mod summary;

pub use config::{DuplicatePolicy, ReconConfig};
pub use engine::{reconcile, reconcile_matrices};
pub use error::ReconError;
pub use export::export_csv;
pub use model::{OrderRecord, ReconItem, ReconResult, ReconStatus, ReconSummary};
pub use records::project_records;
