use std::io::Result;
use std::path::Path;

/// Write a generated source file, creating parent directories as needed.
///
/// Generated output is always overwritten: every invocation is a full
/// regeneration.
pub fn write_source_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}
