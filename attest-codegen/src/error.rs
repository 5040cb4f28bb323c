use std::path::PathBuf;

use thiserror::Error;

use crate::{ConversionError, RenderError, TemplateKind};

/// Terminal failure of a generation run.
///
/// Exactly one of these ends up on the report when a run aborts; the host
/// integration is expected to fail the build step on it. Recoverable
/// problems (unresolved explicit names, unreadable template overrides)
/// never become a `GenerationError`.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid pattern '{pattern}'")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: Box<regex::Error>,
    },

    #[error("unknown template kind '{key}'")]
    UnknownTemplateKind { key: String },

    #[error("failed to convert '{type_name}' to a description")]
    Conversion {
        type_name: String,
        #[source]
        source: ConversionError,
    },

    #[error("failed to render {kind} for '{context}'")]
    Render {
        kind: TemplateKind,
        context: String,
        #[source]
        source: RenderError,
    },

    #[error("failed to write '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
