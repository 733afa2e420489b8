use serde::{Deserialize, Serialize};

/// Quality tier a sample falls into against configured thresholds.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Tier {
    Good,
    Tolerant,
    Bad,
    /// Outside every configured interval.
    Dead,
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Tier::Good => "good",
            Tier::Tolerant => "tolerant",
            Tier::Bad => "bad",
            Tier::Dead => "dead",
        };
        write!(f, "{}", name)
    }
}

/// Numeric range with per-side inclusive or exclusive bounds.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Interval {
    pub low: f64,
    pub high: f64,
    #[serde(default = "default_inclusive")]
    pub low_inclusive: bool,
    #[serde(default = "default_inclusive")]
    pub high_inclusive: bool,
}

fn default_inclusive() -> bool {
    true
}

impl Interval {
    pub fn new(low: f64, high: f64, low_inclusive: bool, high_inclusive: bool) -> Self {
        Self {
            low,
            high,
            low_inclusive,
            high_inclusive,
        }
    }

    /// `[low, high]`
    pub fn closed(low: f64, high: f64) -> Self {
        Self::new(low, high, true, true)
    }

    /// `(low, high)`
    pub fn open(low: f64, high: f64) -> Self {
        Self::new(low, high, false, false)
    }

    /// `(low, high]`
    pub fn left_open(low: f64, high: f64) -> Self {
        Self::new(low, high, false, true)
    }

    /// `[low, high)`
    pub fn right_open(low: f64, high: f64) -> Self {
        Self::new(low, high, true, false)
    }

    pub fn contains(&self, value: f64) -> bool {
        let above = if self.low_inclusive {
            value >= self.low
        } else {
            value > self.low
        };
        let below = if self.high_inclusive {
            value <= self.high
        } else {
            value < self.high
        };
        above && below
    }
}

/// Tier counts for one dimension's sample set.
///
/// Invariant: classifying N samples yields counts summing to N, so
/// `is_empty` distinguishes an empty input from a fully dead one.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stats {
    pub good: usize,
    pub tolerant: usize,
    pub bad: usize,
    pub dead: usize,
}

impl Stats {
    pub fn total(&self) -> usize {
        self.good + self.tolerant + self.bad + self.dead
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn record(&mut self, tier: Tier) {
        match tier {
            Tier::Good => self.good += 1,
            Tier::Tolerant => self.tolerant += 1,
            Tier::Bad => self.bad += 1,
            Tier::Dead => self.dead += 1,
        }
    }
}
