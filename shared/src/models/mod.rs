//! Domain models for the solar forecast service

mod forecast;
mod series;
mod summary;

pub use forecast::*;
pub use series::*;
pub use summary::*;
