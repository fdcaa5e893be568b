use serde::{Deserialize, Serialize};

/// A single sample of a series: `x` is the time or index axis, `y` the value.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point { x, y }
    }
}

impl From<Point> for (f64, f64) {
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

/// Builds a point sequence from `(x, y)` pairs.
pub fn points<I, P>(pairs: I) -> Vec<Point>
where
    I: IntoIterator<Item = P>,
    P: Into<Point>,
{
    pairs.into_iter().map(Into::into).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_tuple() {
        assert_eq!(Point::from((1.5, -2.0)), Point::new(1.5, -2.0));
        let (x, y): (f64, f64) = Point::new(3.0, 4.0).into();
        assert_eq!((x, y), (3.0, 4.0));
    }

    #[test]
    fn serializes_as_object() {
        let json = serde_json::to_string(&Point::new(1.0, 2.5)).unwrap();
        assert_eq!(json, r#"{"x":1.0,"y":2.5}"#);
    }
}
