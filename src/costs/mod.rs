pub mod aggregate;
pub mod config;
pub mod error;
pub mod io;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod report;

pub use error::{CostError, Result};
