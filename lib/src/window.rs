use std::fmt;
use std::str::FromStr;

use crate::{Error, Point};

/// An inclusive range over the x domain of a series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window {
    start: f64,
    end: f64,
}

impl Window {
    pub fn new(start: f64, end: f64) -> Result<Self, Error> {
        if start.is_nan() || end.is_nan() || start > end {
            return Err(Error::InvalidWindow { start, end });
        }
        Ok(Window { start, end })
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn contains(&self, x: f64) -> bool {
        x >= self.start && x <= self.end
    }

    /// Returns the points whose x falls within the window, in their original order.
    pub fn apply(&self, data: &[Point]) -> Vec<Point> {
        data.iter().filter(|p| self.contains(p.x)).copied().collect()
    }
}

/// Restricts `data` to `window`, or passes it through when no window is active.
pub fn window(data: &[Point], window: Option<&Window>) -> Vec<Point> {
    match window {
        Some(w) => w.apply(data),
        None => data.to_vec(),
    }
}

impl FromStr for Window {
    type Err = eyre::Report;

    /// Parses "start:end" or "start,end".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s
            .split_once(':')
            .or_else(|| s.split_once(','))
            .ok_or_else(|| eyre::eyre!("bad window {:?}: expected start:end", s))?;
        let start: f64 = start
            .trim()
            .parse()
            .map_err(|e| eyre::eyre!("bad window start {:?}: {}", start, e))?;
        let end: f64 = end
            .trim()
            .parse()
            .map_err(|e| eyre::eyre!("bad window end {:?}: {}", end, e))?;
        Ok(Window::new(start, end)?)
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Showing data points from {} to {}", self.start(), self.end())
    }
}
