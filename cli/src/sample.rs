use clap::Args;
use eyre::Result;
use tokio::io::AsyncWriteExt;
use tracing::info;
use tribucket::{window, Downsampler, Format, SmallThreshold, Window};

use crate::io::{create_output, read_points};

#[derive(Args, Debug)]
pub struct Opts {
    /// Number of points to keep [0 = all]
    #[clap(long, default_value_t = 100, allow_negative_numbers = true)]
    threshold: i64,

    /// Inclusive x range to sample from, e.g. "100:500" [default: all points]
    #[clap(long, allow_hyphen_values = true)]
    window: Option<Window>,

    /// Handling of thresholds 1 and 2 (reject, endpoints)
    #[clap(long, default_value = "reject")]
    small_threshold: String,

    /// Output encoding (json, csv)
    #[clap(long, default_value = "json")]
    to: Format,

    /// Output file [default: stdout]
    #[clap(long, default_value = "stdout")]
    output: String,

    /// Input files [default: stdin]
    pub files: Vec<String>,
}

pub fn parse_small_threshold(s: &str) -> Result<SmallThreshold> {
    match s {
        "reject" => Ok(SmallThreshold::Reject),
        "endpoints" => Ok(SmallThreshold::Endpoints),
        other => eyre::bail!("unknown small threshold policy: {}", other),
    }
}

pub async fn sample(opts: &Opts) -> Result<()> {
    let threshold = tribucket::threshold(opts.threshold)?;
    let downsampler = Downsampler {
        small_threshold: parse_small_threshold(&opts.small_threshold)?,
        ..Default::default()
    };

    let points = read_points(&opts.files).await?;
    let windowed = window(&points, opts.window.as_ref());
    let sampled = downsampler.downsample(&windowed, threshold)?;
    info!(
        original = windowed.len(),
        sampled = sampled.len(),
        "downsampled"
    );

    let mut output = create_output(&opts.output).await?;
    for point in &sampled {
        opts.to.encode(&mut output, point).await?;
    }
    output.flush().await?;

    Ok(())
}
