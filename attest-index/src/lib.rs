//! TOML type-index parsing for the attest assertion generator.
//!
//! A *type index* is the reference source of structural type facts: a TOML
//! file listing target types, their supertype and their properties. The
//! generation engine consumes these facts through its introspector seam,
//! so the index format is a detail of this crate only.
//!
//! ```toml
//! [types."com.acme.Animal".properties]
//! name = "String"
//!
//! [types."com.acme.Dog"]
//! extends = "com.acme.Animal"
//!
//! [types."com.acme.Dog".properties]
//! breed = "String"
//! toys = "java.util.List<com.acme.Toy>"
//! ```

mod error;
mod file;
mod index;

pub use error::{Error, Result};
pub use file::IndexFile;
pub use index::{TypeEntry, TypeIndex};
