//! Core business logic module
//!
//! Side effects are delegated to [`crate::infra`]; this module decides what
//! happens to each source.
//!
//! # Submodules
//!
//! - [`source`] - Source list parsing and classification
//! - [`locator`] - Finding the binary a build produced
//! - [`pipeline`] - Per-source dispatch and run reporting

pub mod locator;
pub mod pipeline;
pub mod source;
