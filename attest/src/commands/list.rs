use std::path::PathBuf;

use attest_index::IndexFile;
use clap::Args;
use eyre::Result;

use super::UnwrapOrExit;
use crate::ops;

#[derive(Args)]
pub struct ListCommand {
    /// Path to the type index (defaults to ./types.toml)
    #[arg(short, long, default_value = "types.toml")]
    pub index: PathBuf,

    /// Restrict the listing to types under this package (repeatable)
    #[arg(short, long = "package")]
    pub packages: Vec<String>,
}

impl ListCommand {
    /// Run the list command
    pub fn run(&self) -> Result<()> {
        let index_file = IndexFile::open(&self.index).unwrap_or_exit();
        let rows = ops::list(index_file.index(), &self.packages);

        if rows.is_empty() {
            println!("No types found");
            return Ok(());
        }

        println!("Types ({}):", rows.len());
        for row in rows {
            let label = if row.property_count == 1 {
                "property"
            } else {
                "properties"
            };
            match &row.extends {
                Some(parent) => println!(
                    "  {} extends {} ({} {})",
                    row.qualified_name, parent, row.property_count, label
                ),
                None => println!(
                    "  {} ({} {})",
                    row.qualified_name, row.property_count, label
                ),
            }
        }

        Ok(())
    }
}
