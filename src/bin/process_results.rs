//! Aggregates per-trial scores from the save directory.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use line_trials::aggregate::process;
use line_trials::cli::{init_tracing, ProcessCli};

fn main() -> Result<()> {
    let args = ProcessCli::parse();
    init_tracing(args.verbose);

    let written = process(&args.savedir, args.output).with_context(|| {
        format!(
            "producing {} from {}",
            args.output,
            args.savedir.display()
        )
    })?;

    for path in &written {
        info!(path = %path.display(), "wrote");
    }
    Ok(())
}
