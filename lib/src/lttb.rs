use tracing::trace;

use crate::{Error, Point};

/// How thresholds of 1 and 2 are treated when they are smaller than the input.
///
/// The bucket size `(n - 2) / (threshold - 2)` is undefined or negative for
/// them, so they never reach the bucketing loop.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SmallThreshold {
    /// Fail with [`Error::UnderspecifiedThreshold`].
    #[default]
    Reject,
    /// Return only the first and last points.
    Endpoints,
}

/// What to average against when a look-ahead range is empty.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Degenerate {
    /// Use the last input point, which is always emitted after the final bucket.
    #[default]
    FinalPoint,
    /// Fail with [`Error::DegenerateBucket`].
    Reject,
}

/// Largest Triangle Three Buckets (LTTB) downsampler.
///
/// Reduces an x-ordered slice of points to `threshold` points while
/// preserving the visual shape of the data. Every returned point is taken
/// verbatim from the input, in input order.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Downsampler {
    pub small_threshold: SmallThreshold,
    pub degenerate: Degenerate,
}

impl Downsampler {
    pub fn new(small_threshold: SmallThreshold, degenerate: Degenerate) -> Self {
        Downsampler {
            small_threshold,
            degenerate,
        }
    }

    /// Returns the original data unchanged if `threshold == 0` or
    /// `threshold >= data.len()`.
    pub fn downsample(&self, data: &[Point], threshold: usize) -> Result<Vec<Point>, Error> {
        let n = data.len();
        if threshold == 0 || threshold >= n {
            return Ok(data.to_vec());
        }

        if threshold < 3 {
            return match self.small_threshold {
                SmallThreshold::Reject => Err(Error::UnderspecifiedThreshold { threshold, len: n }),
                SmallThreshold::Endpoints => Ok(vec![data[0], data[n - 1]]),
            };
        }

        let bucket_size = (n - 2) as f64 / (threshold - 2) as f64;
        trace!(n, threshold, bucket_size, "lttb");

        // Bucket boundaries are floor(k * bucket_size) + 1, clamped to the
        // interior so float rounding can never index past the last point.
        let edge = |k: usize| ((k as f64 * bucket_size) as usize + 1).min(n - 1);

        let mut sampled = Vec::with_capacity(threshold);
        sampled.push(data[0]);

        let mut anchor = data[0];

        for i in 0..(threshold - 2) {
            // Average of the next bucket for the triangle area calculation.
            let next_start = edge(i + 1);
            let next_end = (((i + 2) as f64 * bucket_size) as usize + 1)
                .min(n)
                .max(next_start);
            let avg = match average(&data[next_start..next_end]) {
                Some(avg) => avg,
                None => match self.degenerate {
                    Degenerate::FinalPoint => data[n - 1],
                    Degenerate::Reject => return Err(Error::DegenerateBucket { bucket: i }),
                },
            };

            let start = edge(i);
            let end = edge(i + 1).max(start + 1);

            let mut max_area = -1.0f64;
            let mut next = data[start];

            for c in &data[start..end] {
                let area = ((anchor.x - avg.x) * (c.y - anchor.y)
                    - (anchor.x - c.x) * (avg.y - anchor.y))
                    .abs();
                if area > max_area {
                    max_area = area;
                    next = *c;
                }
            }

            sampled.push(next);
            anchor = next;
        }

        sampled.push(data[n - 1]);
        Ok(sampled)
    }
}

/// Downsamples `data` to `threshold` points with the default policies.
pub fn downsample(data: &[Point], threshold: usize) -> Result<Vec<Point>, Error> {
    Downsampler::default().downsample(data, threshold)
}

// Mean of a look-ahead range. It is only a triangle vertex and never emitted.
fn average(points: &[Point]) -> Option<Point> {
    if points.is_empty() {
        return None;
    }
    let (sx, sy) = points
        .iter()
        .fold((0.0f64, 0.0f64), |(sx, sy), p| (sx + p.x, sy + p.y));
    let len = points.len() as f64;
    Some(Point::new(sx / len, sy / len))
}
