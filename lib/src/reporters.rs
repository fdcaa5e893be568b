use std::io::Write;

use serde::Serialize;
use tabwriter::TabWriter;

use crate::{Point, Window};

/// Size of one point in the memory estimate: two f64 coordinates.
const POINT_BYTES: f64 = 16.0;

/// Counts describing one downsampling run, as shown in reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub original: usize,
    pub sampled: usize,
    /// sampled / original * 100.
    pub ratio: f64,
    pub view: String,
    #[serde(skip)]
    pub window: Option<Window>,
}

impl Summary {
    pub fn new(original: usize, sampled: usize, window: Option<Window>) -> Self {
        let ratio = if original > 0 {
            sampled as f64 / original as f64 * 100.0
        } else {
            0.0
        };
        let view = match &window {
            Some(w) => w.to_string(),
            None => "Showing all data points".to_string(),
        };
        Summary {
            original,
            sampled,
            ratio,
            view,
            window,
        }
    }

    pub fn from_series(original: &[Point], sampled: &[Point], window: Option<Window>) -> Self {
        Self::new(original.len(), sampled.len(), window)
    }

    /// Number of buckets between the fixed first and last points.
    pub fn buckets(&self) -> usize {
        self.sampled.saturating_sub(2)
    }
}

fn kilobytes(count: usize) -> f64 {
    count as f64 * POINT_BYTES / 1024.0
}

pub fn report_text(s: &Summary, w: &mut dyn Write) -> eyre::Result<()> {
    write!(
        w,
        "LTTB Algorithm Analysis\n\
         \n\
         Original Data Points: {}\n\
         Sampled Data Points: {}\n\
         Compression Ratio: {:.1}%\n\
         \n\
         Current View:\n\
         {}\n\
         \n\
         Algorithm Steps:\n\
         1. Start with the first point, which is always included in the result.\n\
         2. Divide the remaining points into {} buckets based on the desired downsample threshold.\n\
         3. For each bucket:\n   \
            - Calculate the average point (the mean of x and y values) of all the points in the next bucket.\n   \
            - Identify the point that forms the largest triangle area with the previous selected point and that average.\n   \
            - Add the selected point to the result.\n\
         4. End with the last point, which is always included in the result to preserve the end of the data.\n\
         \n\
         Benefits:\n\
         - The algorithm reduces the number of data points while retaining the visual characteristics of the original data.\n\
         - It suits large time series, keeping key trends without overwhelming the viewer with points.\n\
         - By favouring the largest triangle areas, peaks and valleys survive the downsampling.\n\
         \n\
         This analysis can be used to evaluate the effectiveness of the downsampling and its impact on the dataset's integrity.\n",
        s.original,
        s.sampled,
        s.ratio,
        s.view,
        s.buckets(),
    )?;
    Ok(())
}

pub fn report_json(s: &Summary, w: &mut dyn Write) -> eyre::Result<()> {
    serde_json::to_writer(&mut *w, s)?;
    w.write_all(b"\n")?;
    Ok(())
}

/// Writes the side-by-side comparison of the original and sampled series.
pub fn report_table(s: &Summary, w: &mut dyn Write) -> eyre::Result<()> {
    let mut tw = TabWriter::new(w);
    writeln!(tw, "Dataset\tPoints\tMemory")?;
    writeln!(tw, "Original Data\t{}\t{:.2} KB", s.original, kilobytes(s.original))?;
    writeln!(tw, "LTTB Sampled\t{}\t{:.2} KB", s.sampled, kilobytes(s.sampled))?;
    tw.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(f: fn(&Summary, &mut dyn Write) -> eyre::Result<()>, s: &Summary) -> String {
        let mut buf = Vec::new();
        f(s, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn ratio() {
        assert_eq!(Summary::new(1440, 100, None).ratio, 100.0 / 1440.0 * 100.0);
        assert_eq!(Summary::new(0, 0, None).ratio, 0.0);
        assert_eq!(Summary::new(10, 10, None).ratio, 100.0);
    }

    #[test]
    fn text_all_points() {
        let out = render(report_text, &Summary::new(1440, 100, None));
        assert!(out.starts_with("LTTB Algorithm Analysis\n"));
        assert!(out.contains("Original Data Points: 1440\n"));
        assert!(out.contains("Sampled Data Points: 100\n"));
        assert!(out.contains("Compression Ratio: 6.9%\n"));
        assert!(out.contains("Current View:\nShowing all data points\n"));
        assert!(out.contains("into 98 buckets"));
        assert!(out.contains("4. End with the last point"));
        assert!(out.ends_with(
            "\n\nThis analysis can be used to evaluate the effectiveness of the downsampling and its impact on the dataset's integrity.\n"
        ));
    }

    #[test]
    fn text_window() {
        let w = Window::new(200.0, 400.0).unwrap();
        let out = render(report_text, &Summary::new(201, 100, Some(w)));
        assert!(out.contains("Showing data points from 200 to 400\n"));
        assert!(out.contains("Compression Ratio: 49.8%\n"));
    }

    #[test]
    fn text_tiny_sample() {
        let out = render(report_text, &Summary::new(1, 1, None));
        assert!(out.contains("into 0 buckets"));
    }

    #[test]
    fn json() {
        let out = render(report_json, &Summary::new(200, 50, None));
        assert_eq!(
            out,
            "{\"original\":200,\"sampled\":50,\"ratio\":25.0,\"view\":\"Showing all data points\"}\n"
        );
    }

    #[test]
    fn table() {
        let out = render(report_table, &Summary::new(1440, 50, None));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Dataset"));
        assert!(lines[1].starts_with("Original Data"));
        assert!(lines[1].ends_with("22.50 KB"));
        assert!(lines[2].starts_with("LTTB Sampled"));
        assert!(lines[2].ends_with("0.78 KB"));
    }
}
