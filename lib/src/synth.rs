use std::f64::consts::PI;
use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::Point;

/// A named series of a [`Dataset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Voltage,
    Current,
}

impl Channel {
    pub const ALL: [Channel; 2] = [Channel::Voltage, Channel::Current];

    pub fn name(&self) -> &'static str {
        match self {
            Channel::Voltage => "voltage",
            Channel::Current => "current",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One sequence per channel, sharing the same x axis.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Dataset {
    pub voltage: Vec<Point>,
    pub current: Vec<Point>,
}

impl Dataset {
    pub fn channel(&self, channel: Channel) -> &[Point] {
        match channel {
            Channel::Voltage => &self.voltage,
            Channel::Current => &self.current,
        }
    }

    pub fn len(&self) -> usize {
        self.voltage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voltage.is_empty()
    }
}

/// Generates noisy mains-like voltage and current readings.
#[derive(Debug, Clone)]
pub struct Generator {
    pub size: usize,
    pub seed: Option<u64>,
}

impl Default for Generator {
    fn default() -> Self {
        Generator {
            size: 1440,
            seed: None,
        }
    }
}

impl Generator {
    pub fn new(size: usize) -> Self {
        Generator { size, seed: None }
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn generate(&self) -> Dataset {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let size = self.size as f64;
        let mut voltage = Vec::with_capacity(self.size);
        let mut current = Vec::with_capacity(self.size);

        for i in 0..self.size {
            let x = i as f64;
            let phase = x / size;

            let base_voltage = 220.0 + 20.0 * (2.0 * PI * phase).sin();
            voltage.push(Point::new(x, base_voltage + rng.gen_range(-2.0..2.0)));

            let base_current = 10.0 + 3.0 * (4.0 * PI * phase).cos();
            current.push(Point::new(x, base_current + rng.gen_range(-0.25..0.25)));
        }

        Dataset { voltage, current }
    }
}
