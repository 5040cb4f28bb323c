//! Type descriptions for assertion generation.
//!
//! This crate defines the introspection-free snapshot of a target type
//! that the generation pipeline operates on. Descriptions are built once
//! from raw structural facts and never touch the fact source again:
//!
//! ```text
//! type index → RawType (introspection) → TypeDescription (conversion) → templates
//! ```

mod description;
mod type_ref;

pub use description::{Property, TypeDescription};
pub use type_ref::TypeRef;
