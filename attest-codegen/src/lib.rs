//! Generation engine for the attest assertion generator.
//!
//! The engine turns a raw, possibly overlapping set of requested types
//! (package names and explicit type names) into fluent assertion source
//! files plus aggregating entry-point files, and reports what succeeded,
//! what was skipped and what failed.
//!
//! ```text
//! resolve → filter (patterns + generated artifacts) → convert
//!         → generation driver (flat | hierarchical) → entry points
//!                              ↘ report (fed throughout) ↙
//! ```
//!
//! Structural type facts come in through the [`TypeIntrospector`] seam and
//! source text goes out through the [`TemplateBackend`] seam, so the
//! filtering, conversion and generation logic is independent of both.

mod convert;
mod engine;
mod entry_point;
mod error;
mod filter;
mod generate;
mod introspect;
mod report;
mod resolve;
mod template;

pub use convert::{ConversionError, convert, parse_type_ref};
pub use engine::{Engine, ErrorPolicy};
pub use entry_point::{DEFAULT_ENTRY_POINT_PACKAGE, EntryPointBuilder, EntryPointFlavor};
pub use error::GenerationError;
pub use filter::{GENERATED_SUFFIXES, PatternFilter, remove_generated_artifacts};
pub use generate::GenerationDriver;
pub use introspect::{IndexIntrospector, RawType, TypeIntrospector};
pub use report::{
    Diagnostic, FileRole, GeneratedFileRecord, GenerationReport, PreviewFile, Severity,
    TemplateError,
};
pub use resolve::{Resolution, resolve};
pub use template::{DefaultBackend, RenderContext, RenderError, TemplateBackend, TemplateKind};
