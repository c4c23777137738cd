use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::callbacks::{Callbacks, ControlEvent, Controls, OutputId};
use crate::chart::{Figure, PieFigure, ScatterFigure};
use crate::data::model::LaunchDataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset. Replaced wholesale on File → Open, never mutated.
    pub dataset: LaunchDataset,

    /// File the dataset was read from.
    pub source: PathBuf,

    /// Current dropdown / slider values.
    pub controls: Controls,

    /// Last figure rendered into each chart.
    figures: BTreeMap<OutputId, Figure>,

    callbacks: Callbacks,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(dataset: LaunchDataset, source: PathBuf) -> Self {
        let callbacks = Callbacks::dashboard();
        let controls = Controls::initial(&dataset);
        let figures = callbacks.fire_all(&dataset, &controls);
        Self {
            dataset,
            source,
            controls,
            figures,
            callbacks,
            status_message: None,
        }
    }

    /// Swap in a newly loaded dataset: reset the controls and re-render
    /// every chart.
    pub fn set_dataset(&mut self, dataset: LaunchDataset, source: PathBuf) {
        self.controls = Controls::initial(&dataset);
        self.figures = self.callbacks.fire_all(&dataset, &self.controls);
        self.dataset = dataset;
        self.source = source;
        self.status_message = None;
    }

    /// Apply a control change and re-render the charts bound to it.
    pub fn handle(&mut self, event: ControlEvent) {
        let control = event.control();
        if !self.controls.apply(event) {
            return;
        }
        log::debug!("{} changed: {:?}", control.id(), self.controls);

        for (output, figure) in self.callbacks.dispatch(control, &self.dataset, &self.controls) {
            self.figures.insert(output, figure);
        }
    }

    pub fn pie(&self) -> Option<&PieFigure> {
        match self.figures.get(&OutputId::SuccessPieChart)? {
            Figure::Pie(fig) => Some(fig),
            Figure::Scatter(_) => None,
        }
    }

    pub fn scatter(&self) -> Option<&ScatterFigure> {
        match self.figures.get(&OutputId::PayloadScatterChart)? {
            Figure::Scatter(fig) => Some(fig),
            Figure::Pie(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::{launch, two_sites};
    use crate::data::model::Outcome;
    use crate::data::query::{PayloadRange, SiteFilter};

    fn state() -> AppState {
        AppState::new(two_sites(), PathBuf::from("launches.csv"))
    }

    #[test]
    fn test_initial_render() {
        let state = state();
        assert_eq!(state.controls.site, SiteFilter::All);
        assert_eq!(state.pie().unwrap().title, "Total Success Launches by Sites");
        // Observed bounds cover every launch.
        assert_eq!(state.scatter().unwrap().rows.len(), 5);
    }

    #[test]
    fn test_site_change_updates_both_charts() {
        let mut state = state();
        state.handle(ControlEvent::SiteSelected(SiteFilter::Site("A".into())));
        assert_eq!(state.pie().unwrap().title, "Total Success Launches for the A");
        assert_eq!(
            state.scatter().unwrap().title,
            "Correlation between Payload and Success for A"
        );
        assert_eq!(state.scatter().unwrap().rows.len(), 3);
    }

    #[test]
    fn test_slider_change_keeps_pie() {
        let mut state = state();
        let pie_before = state.pie().unwrap().clone();
        state.handle(ControlEvent::PayloadRangeChanged(
            PayloadRange::new(0.0, 3000.0).unwrap(),
        ));
        assert_eq!(state.pie().unwrap(), &pie_before);
        assert_eq!(state.scatter().unwrap().rows.len(), 2);
    }

    #[test]
    fn test_set_dataset_resets_controls() {
        let mut state = state();
        state.handle(ControlEvent::SiteSelected(SiteFilter::Site("A".into())));
        state.status_message = Some("Error: earlier failure".into());

        let replacement = LaunchDataset::from_records(vec![
            launch("X", 100.0, Outcome::Success, "FT"),
            launch("Y", 300.0, Outcome::Failure, "B5"),
        ]);
        state.set_dataset(replacement, PathBuf::from("other.json"));

        assert_eq!(state.controls.site, SiteFilter::All);
        assert_eq!(state.controls.payload, PayloadRange::new(100.0, 300.0).unwrap());
        assert_eq!(state.dataset.sites(), ["X", "Y"]);
        assert!(state.status_message.is_none());
        assert_eq!(state.pie().unwrap().slices.len(), 1);
        assert_eq!(state.scatter().unwrap().rows.len(), 2);
    }
}
