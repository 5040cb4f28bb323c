use std::path::PathBuf;

use attest_codegen::EntryPointFlavor;
use attest_index::IndexFile;
use clap::Args;
use eyre::{Result, bail, eyre};

use super::UnwrapOrExit;
use crate::ops::{self, GenerateOptions};
use crate::reports::{Report, TerminalOutput};

#[derive(Args)]
pub struct GenerateCommand {
    /// Path to the type index (defaults to ./types.toml)
    #[arg(short, long, default_value = "types.toml")]
    pub index: PathBuf,

    /// Output directory for generated sources
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Package to generate assertions for, sub-packages included (repeatable)
    #[arg(short, long = "package")]
    pub packages: Vec<String>,

    /// Fully-qualified type to generate assertions for (repeatable)
    #[arg(short = 't', long = "type")]
    pub types: Vec<String>,

    /// Regex over qualified names; only matching types are kept (repeatable)
    #[arg(long)]
    pub include: Vec<String>,

    /// Regex over qualified names; matching types are skipped (repeatable)
    #[arg(long)]
    pub exclude: Vec<String>,

    /// Generate an abstract/concrete assertion class pair per type
    #[arg(long)]
    pub hierarchical: bool,

    /// Entry-point flavors: standard, bdd, soft, junit-soft (comma-separated)
    #[arg(long = "entry-points", value_delimiter = ',')]
    pub entry_points: Vec<String>,

    /// Package for the entry-point classes (defaults to the common package prefix)
    #[arg(long)]
    pub entry_point_package: Option<String>,

    /// Template override as kind=path (repeatable)
    #[arg(long = "template")]
    pub templates: Vec<String>,

    /// Keep generating past per-type failures
    #[arg(long)]
    pub keep_going: bool,

    /// Preview generated sources without writing to disk
    #[arg(long)]
    pub dry_run: bool,

    /// Print debug diagnostics
    #[arg(long)]
    pub verbose: bool,
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        if self.packages.is_empty() && self.types.is_empty() {
            bail!("nothing to generate: pass at least one --package or --type");
        }

        let entry_points = self.parse_entry_points()?;
        let templates = self.parse_templates()?;

        let index_file = IndexFile::open(&self.index).unwrap_or_exit();

        let report = ops::generate(
            index_file.index(),
            GenerateOptions {
                packages: self.packages.clone(),
                types: self.types.clone(),
                include: self.include.clone(),
                exclude: self.exclude.clone(),
                hierarchical: self.hierarchical,
                entry_points,
                entry_point_package: self.entry_point_package.clone(),
                templates,
                keep_going: self.keep_going,
                dry_run: self.dry_run,
                verbose: self.verbose,
                output: self.output.clone(),
            },
        );

        report.render(&mut TerminalOutput::new());

        if report.failed() {
            std::process::exit(1);
        }
        Ok(())
    }

    fn parse_entry_points(&self) -> Result<Vec<EntryPointFlavor>> {
        self.entry_points
            .iter()
            .map(|flavor| {
                flavor.parse::<EntryPointFlavor>().map_err(|bad| {
                    eyre!("unknown entry-point flavor '{bad}' (expected standard, bdd, soft or junit-soft)")
                })
            })
            .collect()
    }

    fn parse_templates(&self) -> Result<Vec<(String, PathBuf)>> {
        self.templates
            .iter()
            .map(|spec| match spec.split_once('=') {
                Some((kind, path)) if !kind.is_empty() && !path.is_empty() => {
                    Ok((kind.to_string(), PathBuf::from(path)))
                }
                _ => Err(eyre!(
                    "invalid template override '{spec}' (expected kind=path)"
                )),
            })
            .collect()
    }
}
