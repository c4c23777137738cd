use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::error::LoadError;

/// Column names as they appear in the source file.
pub const LAUNCH_SITE: &str = "Launch Site";
pub const PAYLOAD_MASS: &str = "Payload Mass (kg)";
pub const CLASS: &str = "class";
pub const BOOSTER_CATEGORY: &str = "Booster Version Category";

/// Every column a launch file must carry.
pub const REQUIRED_COLUMNS: [&str; 4] = [LAUNCH_SITE, PAYLOAD_MASS, CLASS, BOOSTER_CATEGORY];

// ---------------------------------------------------------------------------
// Outcome – the binary `class` column
// ---------------------------------------------------------------------------

/// Launch outcome. Ordered `Failure < Success` so grouped output follows the
/// numeric class order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "u8")]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    pub fn class(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    pub fn is_success(self) -> bool {
        self == Outcome::Success
    }
}

impl TryFrom<f64> for Outcome {
    type Error = LoadError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value == 0.0 {
            Ok(Outcome::Failure)
        } else if value == 1.0 {
            Ok(Outcome::Success)
        } else {
            Err(LoadError::InvalidOutcome(value))
        }
    }
}

impl From<Outcome> for u8 {
    fn from(outcome: Outcome) -> Self {
        outcome.class()
    }
}

/// Displays as the numeric class, matching the source column.
impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.class())
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single launch. Columns not listed here are ignored when loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchRecord {
    #[serde(rename = "Launch Site")]
    pub launch_site: String,
    #[serde(rename = "Payload Mass (kg)")]
    pub payload_mass_kg: f64,
    #[serde(rename = "class")]
    pub outcome: Outcome,
    #[serde(rename = "Booster Version Category")]
    pub booster_category: String,
}

// ---------------------------------------------------------------------------
// LaunchDataset – the immutable handle shared by every query
// ---------------------------------------------------------------------------

/// The loaded records plus indices derived once at construction.
///
/// Cloning is cheap: records and indices sit behind `Arc`s and are never
/// mutated after `from_records`.
#[derive(Debug, Clone)]
pub struct LaunchDataset {
    records: Arc<[LaunchRecord]>,
    sites: Arc<[String]>,
    booster_categories: Arc<BTreeSet<String>>,
    payload_bounds: Option<(f64, f64)>,
}

impl LaunchDataset {
    /// Build indices from the loaded records.
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        let mut sites: Vec<String> = Vec::new();
        let mut booster_categories = BTreeSet::new();
        let mut payload_bounds: Option<(f64, f64)> = None;

        for rec in &records {
            // First-appearance order, like a dataframe's `unique()`.
            if !sites.contains(&rec.launch_site) {
                sites.push(rec.launch_site.clone());
            }
            booster_categories.insert(rec.booster_category.clone());

            let mass = rec.payload_mass_kg;
            payload_bounds = Some(match payload_bounds {
                Some((lo, hi)) => (lo.min(mass), hi.max(mass)),
                None => (mass, mass),
            });
        }

        LaunchDataset {
            records: records.into(),
            sites: sites.into(),
            booster_categories: Arc::new(booster_categories),
            payload_bounds,
        }
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    /// Distinct launch sites in order of first appearance.
    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    /// Distinct booster version categories, sorted.
    pub fn booster_categories(&self) -> &BTreeSet<String> {
        &self.booster_categories
    }

    /// Observed `(min, max)` payload mass; `None` for an empty dataset.
    pub fn payload_bounds(&self) -> Option<(f64, f64)> {
        self.payload_bounds
    }

    /// Number of launches.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn launch(site: &str, payload: f64, outcome: Outcome, booster: &str) -> LaunchRecord {
        LaunchRecord {
            launch_site: site.to_string(),
            payload_mass_kg: payload,
            outcome,
            booster_category: booster.to_string(),
        }
    }

    /// Two sites: A with classes 1,1,0 and B with classes 1,0.
    pub fn two_sites() -> LaunchDataset {
        use Outcome::*;
        LaunchDataset::from_records(vec![
            launch("A", 2000.0, Success, "FT"),
            launch("A", 6000.0, Success, "B4"),
            launch("B", 4500.0, Success, "FT"),
            launch("A", 500.0, Failure, "v1.1"),
            launch("B", 9600.0, Failure, "B4"),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_outcome_from_class() {
        assert_eq!(Outcome::try_from(0.0_f64), Ok(Outcome::Failure));
        assert_eq!(Outcome::try_from(1.0_f64), Ok(Outcome::Success));
        assert_eq!(Outcome::try_from(2.0_f64), Err(LoadError::InvalidOutcome(2.0)));
        assert!(Outcome::Failure < Outcome::Success);
        assert_eq!(Outcome::Success.to_string(), "1");
    }

    #[test]
    fn test_dataset_indices() {
        let ds = two_sites();
        assert_eq!(ds.len(), 5);
        assert_eq!(ds.sites(), ["A".to_string(), "B".to_string()]);
        assert_eq!(
            ds.booster_categories().iter().collect::<Vec<_>>(),
            vec!["B4", "FT", "v1.1"]
        );
        assert_eq!(ds.payload_bounds(), Some((500.0, 9600.0)));
    }

    #[test]
    fn test_empty_dataset() {
        let ds = LaunchDataset::from_records(Vec::new());
        assert!(ds.is_empty());
        assert!(ds.sites().is_empty());
        assert_eq!(ds.payload_bounds(), None);
    }

    #[test]
    fn test_clone_shares_records() {
        let ds = two_sites();
        let other = ds.clone();
        assert!(std::ptr::eq(ds.records().as_ptr(), other.records().as_ptr()));
    }
}
