use crate::config::resolve::{resolve_config, CliOverrides};
use crate::errors::{DepsError, Result};
use crate::graph::GraphBuilder;
use crate::output::OutputFormat;
use clap::Args;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Entry source file
    pub file: PathBuf,

    /// Base directory to resolve imports against (default: derived from the
    /// entry's module declaration)
    #[arg(long)]
    pub base_dir: Option<PathBuf>,

    /// Output format
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// Bytes read per chunk while scanning a file
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Extension of source modules
    #[arg(long)]
    pub source_extension: Option<String>,

    /// Extension of native-interop modules
    #[arg(long)]
    pub native_extension: Option<String>,

    /// Module name prefix of native-interop modules
    #[arg(long)]
    pub native_prefix: Option<String>,

    /// Project manifest that declares source directories
    #[arg(long)]
    pub manifest: Option<String>,

    /// Do not consult the project manifest for alternate source roots
    #[arg(long)]
    pub no_source_roots: bool,

    /// Suppress the summary line on stderr
    #[arg(long)]
    pub quiet: bool,
}

impl ResolveArgs {
    fn to_cli_overrides(&self) -> CliOverrides {
        CliOverrides {
            format: self.format,
            chunk_size: self.chunk_size,
            source_extension: self.source_extension.clone(),
            native_extension: self.native_extension.clone(),
            native_prefix: self.native_prefix.clone(),
            manifest: self.manifest.clone(),
            no_source_roots: self.no_source_roots,
        }
    }
}

pub fn run(args: &ResolveArgs) -> Result<()> {
    let start = Instant::now();

    let working_dir = std::env::current_dir().map_err(|e| {
        DepsError::Config(format!("Could not determine working directory: {e}"))
    })?;
    let config = resolve_config(&working_dir, &args.to_cli_overrides())?;

    let walker = config.walker();
    let report = walker.walk(&args.file, args.base_dir.as_deref())?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match config.format {
        OutputFormat::Json => {
            crate::output::json::write_dependencies_json(&mut out, &report.dependencies)?
        }
        OutputFormat::Text => {
            crate::output::text::write_dependencies_text(&mut out, &report.dependencies)?
        }
        OutputFormat::Dot => {
            let graph = GraphBuilder::from_report(&report, walker.layout());
            crate::output::dot::write_dot(&mut out, &graph)?;
        }
    }
    out.flush()?;

    if !args.quiet {
        eprintln!(
            "Resolved {} dependencies of {} ({} unreadable) in {:.2}s",
            report.dependencies.len(),
            report.entry.display(),
            report.unreadable.len(),
            start.elapsed().as_secs_f64()
        );
    }

    Ok(())
}
