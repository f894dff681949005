use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Zero-based month index (`0` = January, `11` = December).
///
/// Values are only produced by [`MonthIndex::from_zero_based`] or by normalizing a raw one-based
/// month, so a stored index is always in `0..=11`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct MonthIndex(u8);

impl MonthIndex {
    pub const COUNT: u8 = 12;

    pub fn from_zero_based(index: u8) -> Option<Self> {
        (index < Self::COUNT).then_some(Self(index))
    }

    /// Converts a source month (`1..=12`) into its zero-based index.
    pub fn from_one_based(month: i64) -> Option<Self> {
        if (1..=i64::from(Self::COUNT)).contains(&month) {
            Some(Self((month - 1) as u8))
        } else {
            None
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Long English month name (`%B`).
    pub fn name(self) -> &'static str {
        crate::month::long_month_name(self)
    }

    pub fn all() -> impl Iterator<Item = MonthIndex> {
        (0..Self::COUNT).map(MonthIndex)
    }
}

impl TryFrom<u8> for MonthIndex {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_zero_based(value).ok_or_else(|| format!("month index out of range: {value}"))
    }
}

impl From<MonthIndex> for u8 {
    fn from(value: MonthIndex) -> Self {
        value.0
    }
}

impl std::fmt::Display for MonthIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub year: i32,
    pub month: MonthIndex,
    pub variance: f64,
}

/// A normalized temperature-variance dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub base_temperature: f64,
    pub observations: Vec<Observation>,
}

impl Dataset {
    pub fn new(base_temperature: f64, observations: Vec<Observation>) -> Self {
        Self {
            base_temperature,
            observations,
        }
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Absolute temperature of one observation: `base_temperature + variance`.
    pub fn temperature(&self, observation: &Observation) -> f64 {
        self.base_temperature + observation.variance
    }

    pub fn temperatures(&self) -> impl Iterator<Item = f64> + '_ {
        self.observations.iter().map(|o| self.temperature(o))
    }

    /// `(min, max)` absolute temperature, or `None` for an empty dataset.
    pub fn temperature_extent(&self) -> Option<(f64, f64)> {
        let mut it = self.temperatures();
        let first = it.next()?;
        Some(it.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t))))
    }

    /// Distinct years in ascending order.
    pub fn years(&self) -> Vec<i32> {
        self.observations
            .iter()
            .map(|o| o.year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn year_extent(&self) -> Option<(i32, i32)> {
        let years = self.years();
        Some((*years.first()?, *years.last()?))
    }
}
