//! Figure descriptions handed from the dashboard callbacks to the renderer.

use std::collections::BTreeMap;

use eframe::egui::Color32;

use crate::color::ColorMap;
use crate::data::model::{LaunchDataset, LaunchRecord, Outcome};
use crate::data::query::{
    PayloadRange, SiteFilter, SuccessBreakdown, payload_correlation, success_breakdown,
};

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: usize,
    pub color: Color32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieFigure {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

impl PieFigure {
    pub fn total(&self) -> usize {
        self.slices.iter().map(|s| s.value).sum()
    }

    /// Share of the total for each slice; empty when there is nothing to show.
    pub fn fractions(&self) -> Vec<f64> {
        let total = self.total();
        if total == 0 {
            return Vec::new();
        }
        self.slices
            .iter()
            .map(|s| s.value as f64 / total as f64)
            .collect()
    }

    /// Index of the slice covering `position`, a fraction of the full turn
    /// measured from where the first slice starts.
    pub fn slice_at(&self, position: f64) -> Option<usize> {
        let mut end = 0.0;
        for (i, fraction) in self.fractions().into_iter().enumerate() {
            end += fraction;
            if position < end {
                return Some(i);
            }
        }
        None
    }
}

/// Success counts for the selected site(s) as a pie figure.
pub fn pie_figure(dataset: &LaunchDataset, site: &SiteFilter) -> PieFigure {
    let breakdown = success_breakdown(dataset, site);

    let colors = match &breakdown {
        SuccessBreakdown::BySite(_) => ColorMap::new(dataset.sites().iter().cloned()),
        SuccessBreakdown::ByOutcome(_) => {
            ColorMap::new([Outcome::Failure, Outcome::Success].map(|o| o.to_string()))
        }
    };

    let title = match site {
        SiteFilter::All => "Total Success Launches by Sites".to_string(),
        SiteFilter::Site(name) => format!("Total Success Launches for the {name}"),
    };

    let slices = breakdown
        .counts()
        .into_iter()
        .map(|(label, value)| PieSlice {
            color: colors.color_for(&label),
            label,
            value,
        })
        .collect();

    PieFigure { title, slices }
}

// ---------------------------------------------------------------------------
// Scatter chart
// ---------------------------------------------------------------------------

/// One legend entry: the launches of one booster version category.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    pub name: String,
    pub color: Color32,
    /// `[payload mass, class]` pairs.
    pub points: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterFigure {
    pub title: String,
    pub series: Vec<ScatterSeries>,
    /// The selected launches in dataset order, for the table view.
    pub rows: Vec<LaunchRecord>,
}

impl ScatterFigure {
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }
}

/// Payload against outcome for the selected site(s) and payload range,
/// one series per booster version category.
pub fn scatter_figure(
    dataset: &LaunchDataset,
    site: &SiteFilter,
    range: PayloadRange,
) -> ScatterFigure {
    let selected = payload_correlation(dataset, site, range);

    // Colours come from the dataset-wide category set so a category keeps
    // its colour while the selection changes.
    let colors = ColorMap::new(dataset.booster_categories().iter().cloned());

    let mut by_category: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    for rec in &selected {
        by_category
            .entry(rec.booster_category.as_str())
            .or_default()
            .push([rec.payload_mass_kg, f64::from(rec.outcome.class())]);
    }

    let series = by_category
        .into_iter()
        .map(|(name, points)| ScatterSeries {
            name: name.to_string(),
            color: colors.color_for(name),
            points,
        })
        .collect();

    let title = match site {
        SiteFilter::All => "Correlation between Payload and Success for All Sites".to_string(),
        SiteFilter::Site(name) => format!("Correlation between Payload and Success for {name}"),
    };

    ScatterFigure {
        title,
        series,
        rows: selected.into_iter().cloned().collect(),
    }
}

// ---------------------------------------------------------------------------
// Figure – what a callback produces
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Figure {
    Pie(PieFigure),
    Scatter(ScatterFigure),
}
