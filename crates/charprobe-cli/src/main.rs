use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use charprobe_core::TextLengthProbe;
use charprobe_mupdf::MupdfBackend;

mod output;

use output::ColorMode;

const DEFAULT_PDF_PATH: &str = "out/main.pdf";

/// Report how many characters of extractable text a PDF contains
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the PDF to probe
    #[arg(default_value = DEFAULT_PDF_PATH, allow_hyphen_values = true)]
    path: PathBuf,

    /// Anything after the path is accepted and ignored
    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    extra: Vec<OsString>,
}

fn main() -> ExitCode {
    init_tracing();

    // Exit codes 2 and 3 belong to the probe, so clap's usage errors map to 1
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if !cli.extra.is_empty() {
        tracing::debug!(count = cli.extra.len(), "ignoring extra arguments");
    }

    match probe(&cli.path) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("charprobe: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Diagnostics go to stderr so stdout stays machine-parseable.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn probe(path: &Path) -> anyhow::Result<ExitCode> {
    let probe = TextLengthProbe::new(MupdfBackend::default());
    let result = probe.run(path);
    tracing::debug!(path = %path.display(), ?result, "probe finished");

    let color = ColorMode::detect();
    let mut stdout = std::io::stdout().lock();
    output::print_result(&mut stdout, path, &result, color)?;
    stdout.flush()?;

    Ok(ExitCode::from(output::exit_code(&result)))
}
