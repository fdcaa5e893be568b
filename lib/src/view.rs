use std::collections::BTreeMap;

use crate::{window, Channel, Dataset, Downsampler, Error, Point, Window};

/// The caller-held parameters of a rendered view.
///
/// Every call to [`View::render`] windows and downsamples each channel from
/// scratch.
#[derive(Debug, Clone, Default)]
pub struct View {
    pub threshold: usize,
    pub window: Option<Window>,
    pub downsampler: Downsampler,
}

/// A channel's windowed input alongside its downsampled counterpart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    pub original: Vec<Point>,
    pub sampled: Vec<Point>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub series: BTreeMap<Channel, Series>,
}

impl View {
    pub fn new(threshold: usize) -> Self {
        View {
            threshold,
            ..Default::default()
        }
    }

    pub fn with_window(mut self, window: Option<Window>) -> Self {
        self.window = window;
        self
    }

    pub fn series(&self, data: &[Point]) -> Result<Series, Error> {
        let original = window(data, self.window.as_ref());
        let sampled = self.downsampler.downsample(&original, self.threshold)?;
        Ok(Series { original, sampled })
    }

    pub fn render(&self, data: &Dataset) -> Result<Frame, Error> {
        let mut series = BTreeMap::new();
        for channel in Channel::ALL {
            series.insert(channel, self.series(data.channel(channel))?);
        }
        Ok(Frame { series })
    }
}

impl Frame {
    pub fn get(&self, channel: Channel) -> Option<&Series> {
        self.series.get(&channel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Generator;

    #[test]
    fn renders_every_channel() {
        let data = Generator::new(1000).seed(3).generate();
        let frame = View::new(100).render(&data).unwrap();
        for channel in Channel::ALL {
            let s = frame.get(channel).unwrap();
            assert_eq!(s.original.len(), 1000);
            assert_eq!(s.sampled.len(), 100);
        }
    }

    #[test]
    fn window_then_sample() {
        let data = Generator::new(1000).seed(3).generate();
        let w = Window::new(100.0, 299.0).unwrap();
        let frame = View::new(50).with_window(Some(w)).render(&data).unwrap();
        let s = frame.get(Channel::Voltage).unwrap();
        assert_eq!(s.original.len(), 200);
        assert_eq!(s.sampled.len(), 50);
        assert_eq!(s.sampled[0].x, 100.0);
        assert_eq!(s.sampled[49].x, 299.0);
    }

    #[test]
    fn narrow_window_passes_through() {
        let data = Generator::new(1000).seed(3).generate();
        let w = Window::new(10.0, 19.0).unwrap();
        let frame = View::new(50).with_window(Some(w)).render(&data).unwrap();
        let s = frame.get(Channel::Current).unwrap();
        assert_eq!(s.sampled, s.original);
    }

    #[test]
    fn propagates_threshold_errors() {
        let data = Generator::new(10).seed(3).generate();
        assert!(matches!(
            View::new(2).render(&data),
            Err(Error::UnderspecifiedThreshold { .. })
        ));
    }
}
