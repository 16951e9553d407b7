//! Corpus export

use crate::error::CliResult;
use crate::output::{print_info, print_success};
use clap::Args;
use std::path::PathBuf;
use wizard_core::LibraryVersions;
use wizard_generate::{write_generated_sources, GenerateConfig, Subset};

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// TOML configuration file
    #[arg(short, long, env = "WIZARD_GENERATE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output directory
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Contracts to keep (all, minimal-cover)
    #[arg(short, long)]
    pub subset: Option<Subset>,

    /// Build on the current thread only
    #[arg(long)]
    pub sequential: bool,

    /// Pin default library versions in exported imports
    #[arg(long)]
    pub versioned: bool,
}

impl GenerateArgs {
    /// File configuration with command-line flags applied on top.
    fn config(&self) -> CliResult<GenerateConfig> {
        let mut config = match &self.config {
            Some(path) => GenerateConfig::load(path)?,
            None => GenerateConfig::default(),
        };
        if let Some(dir) = &self.dir {
            config.output_dir = dir.clone();
        }
        if let Some(subset) = self.subset {
            config.subset = subset;
        }
        if self.sequential {
            config.parallel = false;
        }
        if self.versioned && config.versions.is_none() {
            config.versions = Some(LibraryVersions::default());
        }
        Ok(config)
    }
}

/// Execute the generate command
pub fn execute(args: GenerateArgs) -> CliResult<()> {
    let config = args.config()?;
    print_info(&format!(
        "Generating {} contracts into {}",
        config.subset,
        config.output_dir.display()
    ));

    let written = write_generated_sources(&config)?;
    print_success(&format!(
        "Wrote {} contracts to {}",
        written.len(),
        config.output_dir.display()
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn args() -> GenerateArgs {
        GenerateArgs {
            config: None,
            dir: None,
            subset: None,
            sequential: false,
            versioned: false,
        }
    }

    #[test]
    fn test_flags_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "output_dir = \"from-file\"\nsubset = \"all\"").unwrap();

        let config = GenerateArgs {
            config: Some(file.path().to_path_buf()),
            subset: Some(Subset::MinimalCover),
            sequential: true,
            ..args()
        }
        .config()
        .unwrap();

        assert_eq!(config.output_dir, PathBuf::from("from-file"));
        assert_eq!(config.subset, Subset::MinimalCover);
        assert!(!config.parallel);
        assert!(config.versions.is_none());
    }

    #[test]
    fn test_versioned_keeps_file_versions() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[versions]\nopenzeppelin = \"4.9.0\"").unwrap();

        let config = GenerateArgs {
            config: Some(file.path().to_path_buf()),
            versioned: true,
            ..args()
        }
        .config()
        .unwrap();
        assert_eq!(config.versions.unwrap().openzeppelin, "4.9.0");

        let config = GenerateArgs {
            versioned: true,
            ..args()
        }
        .config()
        .unwrap();
        assert_eq!(config.versions, Some(LibraryVersions::default()));
    }
}
