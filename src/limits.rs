//! Threshold classifier: buckets raw metric samples into quality tiers and
//! reduces the tier distribution to a score in [0, 1].

use crate::core::{Interval, Stats, Tier};
use crate::errors::MetricsError;
use serde::{Deserialize, Serialize};

/// How a tier distribution collapses into a single score.
///
/// Exactly two policies exist. Both share the same edge behavior: an empty
/// distribution scores 1.0 (no evidence counts as healthy, see the note on
/// [`EvalPolicy::evaluate`]), and any dead sample forces 0.0 outright.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EvalPolicy {
    /// Fraction of good samples, lightly discounted per bad and tolerant
    /// occurrence.
    Proportion {
        #[serde(default = "default_proportion_bad_penalty")]
        bad_penalty: f64,
        #[serde(default = "default_proportion_tolerant_penalty")]
        tolerant_penalty: f64,
    },
    /// Starts from a perfect score and deducts proportionally to the
    /// severity-weighted share of non-good samples. Preferred; the default
    /// for every dimension.
    Deduction {
        #[serde(default = "default_deduction_bad_penalty")]
        bad_penalty: f64,
        #[serde(default = "default_deduction_tolerant_penalty")]
        tolerant_penalty: f64,
    },
}

pub fn default_proportion_bad_penalty() -> f64 {
    0.1
}

pub fn default_proportion_tolerant_penalty() -> f64 {
    0.02
}

pub fn default_deduction_bad_penalty() -> f64 {
    5.0
}

pub fn default_deduction_tolerant_penalty() -> f64 {
    0.5
}

impl Default for EvalPolicy {
    fn default() -> Self {
        EvalPolicy::Deduction {
            bad_penalty: default_deduction_bad_penalty(),
            tolerant_penalty: default_deduction_tolerant_penalty(),
        }
    }
}

impl EvalPolicy {
    pub fn proportion() -> Self {
        EvalPolicy::Proportion {
            bad_penalty: default_proportion_bad_penalty(),
            tolerant_penalty: default_proportion_tolerant_penalty(),
        }
    }

    pub fn deduction() -> Self {
        EvalPolicy::default()
    }

    /// Reduce a tier distribution to a score in [0, 1].
    ///
    /// An empty distribution scores exactly 1.0: no evidence is treated as
    /// healthy, so a package with zero measured files reports a perfect
    /// index. Callers that want missing data surfaced should check for it
    /// before scoring.
    pub fn evaluate(&self, stats: &Stats) -> f64 {
        if stats.is_empty() {
            return 1.0;
        }
        if stats.dead > 0 {
            return 0.0;
        }
        let total = stats.total() as f64;
        let raw = match *self {
            EvalPolicy::Proportion {
                bad_penalty,
                tolerant_penalty,
            } => {
                stats.good as f64 / total
                    - stats.bad as f64 * bad_penalty
                    - stats.tolerant as f64 * tolerant_penalty
            }
            EvalPolicy::Deduction {
                bad_penalty,
                tolerant_penalty,
            } => {
                1.0 - (stats.bad as f64 * bad_penalty + stats.tolerant as f64 * tolerant_penalty)
                    / total
            }
        };
        raw.clamp(0.0, 1.0)
    }

    fn penalties(&self) -> (f64, f64) {
        match *self {
            EvalPolicy::Proportion {
                bad_penalty,
                tolerant_penalty,
            }
            | EvalPolicy::Deduction {
                bad_penalty,
                tolerant_penalty,
            } => (bad_penalty, tolerant_penalty),
        }
    }

    pub fn validate(&self, name: &str) -> Result<(), String> {
        let (bad_penalty, tolerant_penalty) = self.penalties();
        if !bad_penalty.is_finite() || bad_penalty < 0.0 {
            return Err(format!(
                "{} bad_penalty {} must be a non-negative number",
                name, bad_penalty
            ));
        }
        if !tolerant_penalty.is_finite() || tolerant_penalty < 0.0 {
            return Err(format!(
                "{} tolerant_penalty {} must be a non-negative number",
                name, tolerant_penalty
            ));
        }
        Ok(())
    }
}

/// One metric dimension's classification thresholds and evaluation policy.
///
/// Membership is tested good, then tolerant, then bad, in that fixed order;
/// the first interval containing the value wins, so overlapping intervals
/// are legitimate. A value outside all three is dead.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Limits {
    pub good: Interval,
    pub tolerant: Interval,
    pub bad: Interval,
    #[serde(default)]
    pub policy: EvalPolicy,
}

impl Limits {
    pub fn new(good: Interval, tolerant: Interval, bad: Interval) -> Self {
        Self {
            good,
            tolerant,
            bad,
            policy: EvalPolicy::default(),
        }
    }

    /// Configuration hook: swap the evaluation policy, keeping the intervals.
    pub fn with_policy(mut self, policy: EvalPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn set_policy(&mut self, policy: EvalPolicy) {
        self.policy = policy;
    }

    pub fn tier_of(&self, value: f64) -> Tier {
        if self.good.contains(value) {
            Tier::Good
        } else if self.tolerant.contains(value) {
            Tier::Tolerant
        } else if self.bad.contains(value) {
            Tier::Bad
        } else {
            Tier::Dead
        }
    }

    /// Count tier membership for each sample.
    ///
    /// Fails on the first non-finite sample without producing a partial
    /// count: a NaN cannot be ordered against any interval and classifying
    /// it as dead would silently turn bad input into a 0.0 score.
    pub fn classify(&self, samples: &[f64]) -> Result<Stats, MetricsError> {
        let mut stats = Stats::default();
        for &value in samples {
            if !value.is_finite() {
                return Err(MetricsError::MalformedSample { value });
            }
            stats.record(self.tier_of(value));
        }
        Ok(stats)
    }

    /// Classify then apply the bound evaluation policy.
    pub fn score(&self, samples: &[f64]) -> Result<f64, MetricsError> {
        let stats = self.classify(samples)?;
        if stats.dead > 0 {
            log::warn!(
                "{} of {} samples fall outside every configured interval; score forced to 0",
                stats.dead,
                stats.total()
            );
        }
        Ok(self.policy.evaluate(&stats))
    }

    pub fn validate(&self, name: &str) -> Result<(), String> {
        for (tier, interval) in [
            ("good", &self.good),
            ("tolerant", &self.tolerant),
            ("bad", &self.bad),
        ] {
            if !interval.low.is_finite() || !interval.high.is_finite() {
                return Err(format!("{} {} interval bounds must be finite", name, tier));
            }
            if interval.low > interval.high {
                return Err(format!(
                    "{} {} interval is inverted: low {} exceeds high {}",
                    name, tier, interval.low, interval.high
                ));
            }
        }
        self.policy.validate(name)
    }
}
