use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use ucdage::parse::HeaderPattern;
use ucdage::{GenerateOptions, OutputFormat};

/// Compile a DerivedAge-style UCD file into a binary Unicode age table.
#[derive(Debug, Parser)]
#[command(name = "ucdage", version, about)]
struct Cli {
    /// Source file, e.g. `DerivedAge.txt`.
    input: PathBuf,

    /// Where to write the generated artifact.
    #[arg(short, long)]
    output: PathBuf,

    #[arg(long, value_enum, default_value_t = Format::Rust)]
    format: Format,

    /// Also write a JSON manifest describing the table.
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Filename fragment that carries the release version on the header line.
    #[arg(long, default_value = "DerivedAge")]
    source_name: String,

    #[arg(long, default_value = "txt")]
    source_ext: String,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Only log errors.
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    /// Rust source module embedding the table.
    Rust,
    /// Bare little-endian byte table.
    Raw,
}

impl From<Format> for OutputFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Rust => OutputFormat::Rust,
            Format::Raw => OutputFormat::Raw,
        }
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    use std::io::IsTerminal;
    use tracing_subscriber::{EnvFilter, fmt};

    let directive = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    let subscriber = fmt::fmt()
        .with_env_filter(filter)
        .with_ansi(std::env::var_os("NO_COLOR").is_none() && std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let mut opts = GenerateOptions::new(cli.input, cli.output);
    opts.format = cli.format.into();
    opts.manifest = cli.manifest;
    opts.header = HeaderPattern {
        fragment: cli.source_name,
        ext: cli.source_ext,
    };

    match ucdage::generate(&opts) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
