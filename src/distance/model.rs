use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{HashError, Result};

/// Ordinal risk buckets, closest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceBucket {
    Closest,
    Near,
    Far,
    Farthest,
}

impl DistanceBucket {
    pub const ALL: [DistanceBucket; 4] = [
        DistanceBucket::Closest,
        DistanceBucket::Near,
        DistanceBucket::Far,
        DistanceBucket::Farthest,
    ];

    /// 1 for the safest bucket, 4 for the riskiest.
    pub fn rank(self) -> u8 {
        match self {
            DistanceBucket::Closest => 1,
            DistanceBucket::Near => 2,
            DistanceBucket::Far => 3,
            DistanceBucket::Farthest => 4,
        }
    }

    /// Display hint for UIs.
    pub fn color(self) -> &'static str {
        match self {
            DistanceBucket::Closest => "green",
            DistanceBucket::Near => "lightgreen",
            DistanceBucket::Far => "orange",
            DistanceBucket::Farthest => "red",
        }
    }
}

/// Upper bounds (inclusive) of the first three buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "[u64; 3]", into = "[u64; 3]")]
pub struct Thresholds {
    t1: u64,
    t2: u64,
    t3: u64,
}

impl Thresholds {
    /// Triple used by simple-mode verification.
    pub const SIMPLE: Thresholds = Thresholds {
        t1: 64,
        t2: 128,
        t3: 192,
    };

    /// Triple used by complex-mode verification.
    pub const COMPLEX: Thresholds = Thresholds {
        t1: 32,
        t2: 64,
        t3: 96,
    };

    /// Bounds must be non-decreasing, otherwise classification would not be monotonic.
    pub fn new(t1: u64, t2: u64, t3: u64) -> Result<Self> {
        if t1 > t2 || t2 > t3 {
            return Err(HashError::range(format!(
                "thresholds must be non-decreasing, got [{t1}, {t2}, {t3}]"
            )));
        }
        Ok(Self { t1, t2, t3 })
    }

    pub fn as_array(&self) -> [u64; 3] {
        [self.t1, self.t2, self.t3]
    }
}

impl TryFrom<[u64; 3]> for Thresholds {
    type Error = HashError;

    fn try_from([t1, t2, t3]: [u64; 3]) -> std::result::Result<Self, Self::Error> {
        Thresholds::new(t1, t2, t3)
    }
}

impl From<Thresholds> for [u64; 3] {
    fn from(t: Thresholds) -> Self {
        t.as_array()
    }
}

/// Parses "t1,t2,t3" as found in environment variables.
impl FromStr for Thresholds {
    type Err = HashError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let parts = s
            .split(',')
            .map(|p| {
                p.trim()
                    .parse::<u64>()
                    .map_err(|e| HashError::format(format!("threshold {p:?}: {e}")))
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;
        match parts.as_slice() {
            [t1, t2, t3] => Thresholds::new(*t1, *t2, *t3),
            _ => Err(HashError::format(format!(
                "expected three comma-separated thresholds, got {}",
                parts.len()
            ))),
        }
    }
}
