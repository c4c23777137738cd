use std::collections::BTreeMap;

use super::error::QueryError;
use super::model::{LaunchDataset, LaunchRecord, Outcome};
use crate::settings;

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// Which launch sites a query covers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SiteFilter {
    #[default]
    All,
    Site(String),
}

impl SiteFilter {
    /// Dropdown value standing for every site.
    pub const ALL_VALUE: &'static str = "ALL";

    /// Interpret a dropdown value. Anything but `ALL` names a single site,
    /// whether or not the dataset knows it.
    pub fn from_value(value: &str) -> Self {
        if value == Self::ALL_VALUE {
            SiteFilter::All
        } else {
            SiteFilter::Site(value.to_string())
        }
    }

    pub fn value(&self) -> &str {
        match self {
            SiteFilter::All => Self::ALL_VALUE,
            SiteFilter::Site(name) => name,
        }
    }

    /// Human-readable label for the dropdown.
    pub fn label(&self) -> &str {
        match self {
            SiteFilter::All => "All Sites",
            SiteFilter::Site(name) => name,
        }
    }

    pub fn matches(&self, site: &str) -> bool {
        match self {
            SiteFilter::All => true,
            SiteFilter::Site(name) => name == site,
        }
    }
}

/// Inclusive payload mass range in kilograms. Both bounds are non-negative
/// and `lower <= upper`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    lower: f64,
    upper: f64,
}

impl PayloadRange {
    /// The full span of the payload slider.
    pub const SLIDER_SPAN: PayloadRange = PayloadRange {
        lower: settings::PAYLOAD_SLIDER_MIN,
        upper: settings::PAYLOAD_SLIDER_MAX,
    };

    pub fn new(lower: f64, upper: f64) -> Result<Self, QueryError> {
        for bound in [lower, upper] {
            if !bound.is_finite() || bound < 0.0 {
                return Err(QueryError::InvalidBound(bound));
            }
        }
        if lower > upper {
            return Err(QueryError::InvertedRange { lower, upper });
        }
        Ok(PayloadRange { lower, upper })
    }

    /// Default slider position: the observed payload bounds of the dataset,
    /// or the whole slider span when there is nothing to observe.
    pub fn observed(dataset: &LaunchDataset) -> Self {
        dataset
            .payload_bounds()
            .and_then(|(lo, hi)| PayloadRange::new(lo, hi).ok())
            .unwrap_or(Self::SLIDER_SPAN)
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    pub fn contains(&self, mass: f64) -> bool {
        self.lower <= mass && mass <= self.upper
    }
}

// ---------------------------------------------------------------------------
// Success-ratio aggregation (pie chart)
// ---------------------------------------------------------------------------

/// Counts feeding the pie chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuccessBreakdown {
    /// Successful launches per site. Sites without a success are absent.
    BySite(BTreeMap<String, usize>),
    /// Launches per outcome at one site. Outcomes that never occur are absent.
    ByOutcome(BTreeMap<Outcome, usize>),
}

impl SuccessBreakdown {
    /// `(category label, count)` pairs in key order.
    pub fn counts(&self) -> Vec<(String, usize)> {
        match self {
            SuccessBreakdown::BySite(map) => {
                map.iter().map(|(site, n)| (site.clone(), *n)).collect()
            }
            SuccessBreakdown::ByOutcome(map) => {
                map.iter().map(|(outcome, n)| (outcome.to_string(), *n)).collect()
            }
        }
    }

    pub fn total(&self) -> usize {
        match self {
            SuccessBreakdown::BySite(map) => map.values().sum(),
            SuccessBreakdown::ByOutcome(map) => map.values().sum(),
        }
    }
}

/// Group successful launches by site (`All`), or one site's launches by
/// outcome. An unknown site yields an empty breakdown.
pub fn success_breakdown(dataset: &LaunchDataset, site: &SiteFilter) -> SuccessBreakdown {
    match site {
        SiteFilter::All => {
            let mut per_site = BTreeMap::new();
            for rec in dataset.records().iter().filter(|r| r.outcome.is_success()) {
                *per_site.entry(rec.launch_site.clone()).or_insert(0) += 1;
            }
            SuccessBreakdown::BySite(per_site)
        }
        SiteFilter::Site(name) => {
            let mut per_outcome = BTreeMap::new();
            for rec in dataset.records().iter().filter(|r| &r.launch_site == name) {
                *per_outcome.entry(rec.outcome).or_insert(0) += 1;
            }
            SuccessBreakdown::ByOutcome(per_outcome)
        }
    }
}

// ---------------------------------------------------------------------------
// Payload-correlation selection (scatter chart)
// ---------------------------------------------------------------------------

/// Records whose payload lies within `range` (inclusive) at the selected
/// site, in dataset order.
pub fn payload_correlation<'a>(
    dataset: &'a LaunchDataset,
    site: &SiteFilter,
    range: PayloadRange,
) -> Vec<&'a LaunchRecord> {
    dataset
        .records()
        .iter()
        .filter(|rec| range.contains(rec.payload_mass_kg))
        .filter(|rec| site.matches(&rec.launch_site))
        .collect()
}
