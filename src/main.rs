use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use flume_params::{ExportFormat, FlumeParams, Snapshot};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "flume-params",
    about = "Resolve Flume deployment parameters from a host command",
    version
)]
struct Cli {
    /// Command document written by the orchestration host (JSON).
    #[arg(long, value_name = "FILE")]
    command: PathBuf,

    /// Override files merged over the command, in order (JSON or .toml). Missing files are skipped.
    #[arg(long = "override", value_name = "FILE")]
    overrides: Vec<PathBuf>,

    /// Apply environment overrides named <PREFIX>__section__key.
    #[arg(long, value_name = "PREFIX")]
    env_prefix: Option<String>,

    /// Output rendering: json or shell.
    #[arg(long, default_value = "json")]
    format: ExportFormat,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut builder = Snapshot::builder().with_file(&cli.command, true);
    for path in &cli.overrides {
        builder = builder.with_file(path, false);
    }
    if let Some(prefix) = &cli.env_prefix {
        builder = builder.with_env(prefix.clone(), "__");
    }

    let snapshot = builder
        .build()
        .with_context(|| format!("loading {}", cli.command.display()))?;
    let params = FlumeParams::resolve(&snapshot).context("resolving flume parameters")?;
    let rendered = params.render(cli.format)?;

    std::io::stdout()
        .lock()
        .write_all(rendered.as_bytes())
        .context("writing parameters")?;
    Ok(())
}
