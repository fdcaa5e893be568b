use clap::Args;
use eyre::Result;
use tokio::io::AsyncWriteExt;
use tribucket::{Generator, Point, Summary, View, Window};

use crate::io::{create_output, read_points};

#[derive(Args, Debug)]
pub struct Opts {
    /// Report type (text, json, table)
    #[clap(long, name = "type", default_value = "text")]
    pub report_type: String,

    /// Number of points to keep [0 = all]
    #[clap(long, default_value_t = 100, allow_negative_numbers = true)]
    pub threshold: i64,

    /// Inclusive x range to report on, e.g. "100:500" [default: all points]
    #[clap(long, allow_hyphen_values = true)]
    pub window: Option<Window>,

    /// Size of the generated voltage series used when no files are given
    #[clap(long, default_value_t = 1440)]
    pub size: usize,

    /// Seed for the generated series [default: random]
    #[clap(long)]
    pub seed: Option<u64>,

    /// Output file [default: stdout]
    #[clap(long, default_value = "stdout")]
    pub output: String,

    /// Input files [default: generated voltage series]
    pub files: Vec<String>,
}

pub async fn report(opts: &Opts) -> Result<()> {
    let points = if opts.files.is_empty() {
        let mut generator = Generator::new(opts.size);
        generator.seed = opts.seed;
        generator.generate().voltage
    } else {
        read_points(&opts.files).await?
    };

    let summary = summarize(&points, opts.threshold, opts.window)?;
    let buf = render(&opts.report_type, &summary)?;

    let mut output = create_output(&opts.output).await?;
    output.write_all(&buf).await?;
    output.flush().await?;
    Ok(())
}

// The original count is the whole series; the sampled count comes from the
// windowed one.
fn summarize(points: &[Point], threshold: i64, window: Option<Window>) -> Result<Summary> {
    let view = View::new(tribucket::threshold(threshold)?).with_window(window);
    let series = view.series(points)?;
    Ok(Summary::from_series(points, &series.sampled, window))
}

fn render(report_type: &str, summary: &Summary) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    match report_type {
        "text" => tribucket::report_text(summary, &mut buf)?,
        "json" => tribucket::report_json(summary, &mut buf)?,
        "table" => tribucket::report_table(summary, &mut buf)?,
        other => eyre::bail!("unknown report type: {}", other),
    }
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series() -> Vec<Point> {
        Generator::new(1000).seed(11).generate().voltage
    }

    #[test]
    fn window_counts() {
        let w = Window::new(100.0, 399.0).unwrap();
        let summary = summarize(&series(), 50, Some(w)).unwrap();
        assert_eq!(summary.original, 1000);
        assert_eq!(summary.sampled, 50);
        assert_eq!(summary.ratio, 5.0);
        assert_eq!(summary.view, "Showing data points from 100 to 399");
    }

    #[test]
    fn window_narrower_than_threshold() {
        let w = Window::new(0.0, 9.0).unwrap();
        let summary = summarize(&series(), 50, Some(w)).unwrap();
        assert_eq!(summary.original, 1000);
        assert_eq!(summary.sampled, 10);
    }

    #[test]
    fn all_points() {
        let summary = summarize(&series(), 100, None).unwrap();
        assert_eq!(summary.sampled, 100);
        assert_eq!(summary.view, "Showing all data points");
    }

    #[test]
    fn bad_thresholds() {
        assert!(summarize(&series(), -1, None).is_err());
        assert!(summarize(&series(), 2, None).is_err());
    }

    #[test]
    fn report_types() {
        let summary = Summary::new(1000, 50, None);
        let text = String::from_utf8(render("text", &summary).unwrap()).unwrap();
        assert!(text.contains("Compression Ratio: 5.0%"));
        let json = String::from_utf8(render("json", &summary).unwrap()).unwrap();
        assert!(json.starts_with("{\"original\":1000,\"sampled\":50"));
        let table = String::from_utf8(render("table", &summary).unwrap()).unwrap();
        assert!(table.starts_with("Dataset"));
        let err = render("hist", &summary).unwrap_err();
        assert_eq!(err.to_string(), "unknown report type: hist");
    }
}
