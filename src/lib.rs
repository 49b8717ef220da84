//! xlate-audit - translation auditor for Android string resources
//!
//! Compares every translated `strings.xml` against the master file and
//! reports keys missing on either side, plus translations whose master text
//! changed after they were written. Staleness is decided from version
//! control history (Mercurial or Git), not from timestamps.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Validation engine (parse, attribute, order, compare)
//! - `issues`: Issue type definitions and reporting

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
