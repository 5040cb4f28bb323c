//! Core utilities and types for the attest assertion generator.
//!
//! This crate provides file-writing helpers and dotted-name utilities
//! used across the attest ecosystem.

mod file;
mod names;

// File operations
pub use file::write_source_file;
// Dotted-name utilities
pub use names::{
    common_package_prefix, is_qualified_name, package_of, package_to_path, simple_name,
    to_pascal_case,
};
