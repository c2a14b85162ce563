//! `orderrecon-engine`: analysis passes over imported sheets.
//!
//! Pure functions over a fully loaded [`Matrix`]: header extraction, target
//! counting, statistics and data health. No IO; malformed data degrades to
//! empty or zero results instead of errors.

pub mod cell;
pub mod columns;
pub mod header;
pub mod health;
pub mod locale;
pub mod options;
pub mod parse;
pub mod stats;
pub mod targets;

pub use cell::{Cell, Matrix};
pub use columns::{ColumnKeywords, ColumnMap, ColumnRole};
pub use header::{extract_header, HeaderLabels, HeaderRecord};
pub use health::{assess_data_health, HealthAssessment};
pub use locale::Locale;
pub use options::AnalysisOptions;
pub use parse::{parse_amount, parse_date};
pub use stats::{calculate_date_range, calculate_statistics, generate_trend_data, DateRange, Statistics};
pub use targets::{count_targets, TargetCounts, TargetSet};
