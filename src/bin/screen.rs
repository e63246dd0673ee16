//! Screen a key file against the FIPS 140 statistical tests.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use fipskeyscreen::{report, screen_keys_text, KeyEncoding, ThresholdProfile};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "screen")]
#[command(about = "Run the FIPS 140 monobit, poker, runs and long run tests over a key file")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ", ", env!("GIT_DATE"), ")"))]
struct Cli {
    /// Key file, one key per line
    file: PathBuf,

    /// Key encoding: hex or base64
    #[arg(long, default_value = "hex")]
    encoding: KeyEncoding,

    /// Threshold profile: fips140-1, fips140-2, or either with -per-bit
    #[arg(long, default_value = "fips140-1")]
    profile: ThresholdProfile,

    /// Print the verdict matrix as JSON instead of the text report
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fipskeyscreen=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let text = match std::fs::read_to_string(&cli.file) {
        Ok(text) => text,
        Err(e) => {
            error!("Failed to read {}: {}", cli.file.display(), e);
            eprintln!("error: cannot read {}: {}", cli.file.display(), e);
            return ExitCode::from(2);
        }
    };

    let matrix = match screen_keys_text(&text, cli.encoding, cli.profile) {
        Ok(matrix) => matrix,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::from(2);
        }
    };
    info!("Screened {} keys from {}", matrix.len(), cli.file.display());

    if cli.json {
        match serde_json::to_string_pretty(&matrix) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("error: failed to serialize results: {}", e);
                return ExitCode::from(2);
            }
        }
    } else {
        print!("{}", report::format_report(&matrix));
    }

    if matrix.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}
