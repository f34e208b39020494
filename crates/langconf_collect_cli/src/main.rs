use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use langconf_collect::{
    ReportCollect, SpecCopyEvent, collect_language_configurations, resolve_resources_root,
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(name = "copy-language-configuration", version)]
#[command(
    about = "Copy every language-configuration.json under an extension directory into the `resources` directory next to this executable",
    long_about = None
)]
struct Args {
    /// Extension directory to scan
    path_to_extension: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging()?;

    let path_exe = std::env::current_exe()
        .and_then(|p| p.canonicalize())
        .context("Failed to locate the running executable")?;
    let path_dir_resources = resolve_resources_root(&path_exe)?;
    tracing::debug!("Resources directory: {}", path_dir_resources.display());

    let report = run(
        &args.path_to_extension,
        &path_dir_resources,
        &mut io::stdout().lock(),
    )?;
    tracing::debug!("{report}");
    Ok(())
}

/// Progress lines go to `out`; diagnostics go to the tracing subscriber.
fn run<W: Write>(
    path_dir_src: &Path,
    path_dir_resources: &Path,
    out: &mut W,
) -> Result<ReportCollect> {
    let mut res_write: io::Result<()> = Ok(());
    let mut sink = |event: &SpecCopyEvent| {
        if res_write.is_ok() {
            res_write = writeln!(out, "{event}");
        }
    };

    let report = collect_language_configurations(path_dir_src, path_dir_resources, &mut sink)
        .with_context(|| {
            format!(
                "Failed to collect language configurations from {}",
                path_dir_src.display()
            )
        })?;
    res_write.context("Failed to write progress to stdout")?;
    Ok(report)
}

fn init_logging() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false)
                .with_writer(io::stderr),
        )
        .try_init()?;
    Ok(())
}
