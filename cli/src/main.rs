mod generate;
mod io;
mod plot;
mod report;
mod sample;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "tribucket",
    about = "Largest-Triangle-Three-Buckets downsampling for voltage and current series"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a synthetic voltage or current series
    Generate(generate::Opts),
    /// Downsample a series with LTTB
    Sample(sample::Opts),
    /// Summarize a downsampling run
    Report(report::Opts),
    /// Generate an HTML plot of original and downsampled series
    Plot(plot::Opts),
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();
    match cli.command {
        Command::Generate(opts) => generate::generate(&opts).await,
        Command::Sample(opts) => sample::sample(&opts).await,
        Command::Report(opts) => report::report(&opts).await,
        Command::Plot(opts) => plot::plot(&opts).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_window_parses() {
        for args in [
            ["tribucket", "sample", "--window", "-50:10"],
            ["tribucket", "report", "--window", "-50:10"],
            ["tribucket", "plot", "--window", "-50:10"],
        ] {
            assert!(Cli::try_parse_from(args).is_ok(), "{:?}", args);
        }
        assert!(Cli::try_parse_from(["tribucket", "sample", "--window", "10:-50"]).is_err());
    }
}
