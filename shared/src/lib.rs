//! Shared types and the time-series pipeline for the solar forecast service
//!
//! Everything in this crate is pure: no I/O and no clock reads. It is used
//! by the backend and, through the wasm crate, by the browser.

pub mod aggregation;
pub mod error;
pub mod models;
pub mod records;
pub mod series;
pub mod types;
pub mod validation;

pub use aggregation::summarize;
pub use error::*;
pub use models::*;
pub use records::{build_daily_records, build_hourly_records, calculate_solar_energy, DailyColumns};
pub use series::reconstruct;
pub use types::*;
pub use validation::*;
