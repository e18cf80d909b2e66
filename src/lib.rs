//! Core library for the cost-report command line application.
//!
//! The library exposes the stages of the batch job so they can be driven by
//! the binary and exercised by the tests. Input adapters live under
//! [`costs::io`], record and statistics types inside [`costs::model`], the
//! reductions in [`costs::aggregate`], the report layout in
//! [`costs::report`], and the end-to-end orchestration in
//! [`costs::pipeline`].

pub mod costs;

pub use costs::{CostError, Result, aggregate, config, error, io, logging, model, pipeline, report};
