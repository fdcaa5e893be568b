use clap::Args;
use eyre::Result;
use tokio::io::AsyncWriteExt;
use tracing::info;
use tribucket::{Channel, Format, Generator};

use crate::io::create_output;

#[derive(Args, Debug)]
pub struct Opts {
    /// Number of points to generate
    #[clap(long, default_value_t = 1440)]
    size: usize,

    /// Seed for the noise generator [default: random]
    #[clap(long)]
    seed: Option<u64>,

    /// Channel to emit (voltage, current)
    #[clap(long, default_value = "voltage")]
    channel: String,

    /// Output encoding (json, csv)
    #[clap(long, default_value = "json")]
    to: Format,

    /// Output file [default: stdout]
    #[clap(long, default_value = "stdout")]
    output: String,
}

pub fn parse_channel(s: &str) -> Result<Channel> {
    match s {
        "voltage" => Ok(Channel::Voltage),
        "current" => Ok(Channel::Current),
        other => eyre::bail!("unknown channel: {}", other),
    }
}

pub async fn generate(opts: &Opts) -> Result<()> {
    let channel = parse_channel(&opts.channel)?;

    let mut generator = Generator::new(opts.size);
    generator.seed = opts.seed;
    let data = generator.generate();
    info!(size = opts.size, %channel, "generated");

    let mut output = create_output(&opts.output).await?;
    for point in data.channel(channel) {
        opts.to.encode(&mut output, point).await?;
    }
    output.flush().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channels() {
        assert_eq!(parse_channel("current").unwrap(), Channel::Current);
        assert!(parse_channel("power").is_err());
    }
}
