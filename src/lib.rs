//! plugin-provisioner - Provision executable plugins for a host process
//!
//! Reads a list of plugin sources, downloads direct file URLs, clones and
//! builds git repositories, and installs the resulting executables into a
//! shared output directory.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Source classification, binary location and the pipeline driver
//! - [`infra`] - Infrastructure layer (network, filesystem, processes)
//! - [`config`] - Configuration and constants
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;
