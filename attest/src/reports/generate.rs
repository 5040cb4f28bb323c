//! Generate command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from one generation run.
#[derive(Debug)]
pub struct GenerateReport {
    /// Output directory the run targeted.
    pub destination: PathBuf,

    /// Whether the run was a preview.
    pub dry_run: bool,

    /// Paths of generated assertion files (concrete and abstract).
    pub assertion_files: Vec<String>,

    /// Paths of generated entry-point files.
    pub entry_point_files: Vec<String>,

    /// Per-type failures recorded while the run kept going.
    pub errors: Vec<String>,

    /// Warning diagnostics.
    pub warnings: Vec<String>,

    /// Debug diagnostics (empty unless verbose output was requested).
    pub debug: Vec<String>,

    /// Files captured instead of written in dry-run mode.
    pub previews: Vec<PreviewFile>,

    /// The terminal failure that aborted the run, if any.
    pub failure: Option<String>,
}

/// A file in preview mode.
#[derive(Debug)]
pub struct PreviewFile {
    /// File path.
    pub path: String,
    /// File content.
    pub content: String,
}

impl GenerateReport {
    /// Whether the run ended in a terminal failure.
    pub fn failed(&self) -> bool {
        self.failure.is_some()
    }
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        for line in &self.debug {
            out.debug(line);
        }
        for warning in &self.warnings {
            out.warning(warning);
        }
        for error in &self.errors {
            out.error(error);
        }

        if self.dry_run {
            self.render_preview(out);
        } else {
            self.render_written(out);
        }

        if let Some(failure) = &self.failure {
            out.newline();
            out.error(failure);
        }
    }
}

impl GenerateReport {
    fn render_written(&self, out: &mut dyn Output) {
        if !self.assertion_files.is_empty() {
            out.section(&format!("Generated ({})", self.assertion_files.len()));
            for file in &self.assertion_files {
                out.added_item(file);
            }
        }

        if !self.entry_point_files.is_empty() {
            out.newline();
            out.section("Entry points");
            for file in &self.entry_point_files {
                out.added_item(file);
            }
        }

        if self.failure.is_none() {
            out.newline();
            out.key_value("Output directory", &self.destination.display().to_string());
        }
    }

    fn render_preview(&self, out: &mut dyn Output) {
        for file in &self.previews {
            out.divider(&file.path);
            out.preformatted(&file.content);
        }

        out.divider("Summary");
        out.preformatted(&format!("{} files would be generated", self.previews.len()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Captured {
        lines: Vec<String>,
    }

    impl Output for Captured {
        fn section(&mut self, name: &str) {
            self.lines.push(format!("{}:", name));
        }
        fn key_value(&mut self, key: &str, value: &str) {
            self.lines.push(format!("{}: {}", key, value));
        }
        fn key_value_indented(&mut self, key: &str, value: &str) {
            self.lines.push(format!("  {}: {}", key, value));
        }
        fn added_item(&mut self, text: &str) {
            self.lines.push(format!("  + {}", text));
        }
        fn error(&mut self, msg: &str) {
            self.lines.push(format!("error: {}", msg));
        }
        fn warning(&mut self, msg: &str) {
            self.lines.push(format!("warning: {}", msg));
        }
        fn debug(&mut self, msg: &str) {
            self.lines.push(format!("debug: {}", msg));
        }
        fn divider(&mut self, label: &str) {
            self.lines.push(format!("── {} ──", label));
        }
        fn preformatted(&mut self, text: &str) {
            self.lines.push(text.to_string());
        }
        fn newline(&mut self) {
            self.lines.push(String::new());
        }
    }

    fn report() -> GenerateReport {
        GenerateReport {
            destination: PathBuf::from("out"),
            dry_run: false,
            assertion_files: vec!["out/com/acme/DogAssert.java".to_string()],
            entry_point_files: vec!["out/com/acme/Assertions.java".to_string()],
            errors: Vec::new(),
            warnings: vec!["[resolve] input type not found: com.acme.Cat".to_string()],
            debug: Vec::new(),
            previews: Vec::new(),
            failure: None,
        }
    }

    #[test]
    fn test_written_render_lists_files() {
        let mut out = Captured::default();
        report().render(&mut out);

        assert!(out.lines.contains(&"Generated (1):".to_string()));
        assert!(
            out.lines
                .contains(&"  + out/com/acme/DogAssert.java".to_string())
        );
        assert!(out.lines.contains(&"Entry points:".to_string()));
        assert!(
            out.lines
                .contains(&"warning: [resolve] input type not found: com.acme.Cat".to_string())
        );
        assert!(out.lines.contains(&"Output directory: out".to_string()));
    }

    #[test]
    fn test_failed_render_ends_with_the_failure() {
        let mut failed = report();
        failed.failure = Some("unknown template kind 'bogus'".to_string());

        let mut out = Captured::default();
        failed.render(&mut out);

        assert_eq!(
            out.lines.last().unwrap(),
            "error: unknown template kind 'bogus'"
        );
        assert!(!out.lines.contains(&"Output directory: out".to_string()));
    }

    #[test]
    fn test_preview_render_shows_content_and_summary() {
        let mut preview = report();
        preview.dry_run = true;
        preview.previews = vec![PreviewFile {
            path: "out/com/acme/DogAssert.java".to_string(),
            content: "public class DogAssert {}".to_string(),
        }];

        let mut out = Captured::default();
        preview.render(&mut out);

        assert!(
            out.lines
                .contains(&"── out/com/acme/DogAssert.java ──".to_string())
        );
        assert!(out.lines.contains(&"public class DogAssert {}".to_string()));
        assert!(out.lines.contains(&"1 files would be generated".to_string()));
    }
}
