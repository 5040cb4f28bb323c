use std::path::PathBuf;

use attest_index::IndexFile;
use clap::Args;
use eyre::Result;

use super::UnwrapOrExit;
use crate::ops::{self, CheckOptions};
use crate::reports::{Report, TerminalOutput};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to the type index (defaults to ./types.toml)
    #[arg(short, long, default_value = "types.toml")]
    pub index: PathBuf,

    /// Preview resolution for this package, sub-packages included (repeatable)
    #[arg(short, long = "package")]
    pub packages: Vec<String>,

    /// Preview resolution for this fully-qualified type (repeatable)
    #[arg(short = 't', long = "type")]
    pub types: Vec<String>,

    /// Regex over qualified names; only matching types are kept (repeatable)
    #[arg(long)]
    pub include: Vec<String>,

    /// Regex over qualified names; matching types are skipped (repeatable)
    #[arg(long)]
    pub exclude: Vec<String>,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let index_file = IndexFile::open(&self.index).unwrap_or_exit();

        let report = ops::check(
            &index_file,
            &CheckOptions {
                packages: self.packages.clone(),
                types: self.types.clone(),
                include: self.include.clone(),
                exclude: self.exclude.clone(),
            },
        )?;
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
