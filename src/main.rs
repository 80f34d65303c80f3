use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use pagefix::{ConfigLoader, PatchApplier, PatcherConfig};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML config file (input, output, atomic_write, dry_run)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Page to patch (defaults to public/index.html)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Where to write the patched page (defaults to the input)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write through a temporary file and rename it into place
    #[arg(short, long)]
    atomic: bool,

    /// Print a unified diff instead of writing
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> Result<PatcherConfig> {
        let loader = match &self.config {
            Some(path) => ConfigLoader::with_path(path),
            None => ConfigLoader::new(),
        };
        let mut config = loader.load().context("Failed to load configuration")?;

        if let Some(input) = self.input {
            config.input = input;
        }
        if let Some(output) = self.output {
            config.output = Some(output);
        }
        config.atomic_write |= self.atomic;
        config.dry_run |= self.dry_run;

        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    pagefix::init_with_logger(cli.verbose)?;

    let config = cli.into_config()?;
    info!(
        "pagefix v{}: {} -> {}",
        pagefix::version(),
        config.input.display(),
        config.output_path().display()
    );

    let applier = PatchApplier::new(config)?;
    let stdout = std::io::stdout();
    applier
        .run(&mut stdout.lock())
        .with_context(|| format!("Failed to patch {}", applier.config().input.display()))?;

    Ok(())
}
