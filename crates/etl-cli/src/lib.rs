//! Command-line surface for the ETL pipeline.
//!
//! The binary wires the source adapters, the transform pipeline, and the
//! sink adapter together: the caller picks one source, toggles stages, and
//! optionally names a destination table. Everything here is glue; the
//! pipeline semantics live in the library crates.

#![deny(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
