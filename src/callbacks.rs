//! Control → chart wiring.
//!
//! Every control change is routed through a [`Callbacks`] registry that maps
//! a control id to the handlers it drives. A handler is a plain function of
//! the dataset handle and the current control values, so re-rendering a chart
//! never touches shared mutable state.

use std::collections::BTreeMap;

use crate::chart::{self, Figure};
use crate::data::model::LaunchDataset;
use crate::data::query::{PayloadRange, SiteFilter};

/// Input controls on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ControlId {
    SiteDropdown,
    PayloadSlider,
}

impl ControlId {
    pub fn id(self) -> &'static str {
        match self {
            ControlId::SiteDropdown => "site-dropdown",
            ControlId::PayloadSlider => "payload-slider",
        }
    }
}

/// Chart widgets a handler can render into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OutputId {
    SuccessPieChart,
    PayloadScatterChart,
}

impl OutputId {
    pub fn id(self) -> &'static str {
        match self {
            OutputId::SuccessPieChart => "success-pie-chart",
            OutputId::PayloadScatterChart => "success-payload-scatter-chart",
        }
    }
}

/// A change reported by a control, carrying its new value.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlEvent {
    SiteSelected(SiteFilter),
    PayloadRangeChanged(PayloadRange),
}

impl ControlEvent {
    pub fn control(&self) -> ControlId {
        match self {
            ControlEvent::SiteSelected(_) => ControlId::SiteDropdown,
            ControlEvent::PayloadRangeChanged(_) => ControlId::PayloadSlider,
        }
    }
}

/// Current value of every control.
#[derive(Debug, Clone, PartialEq)]
pub struct Controls {
    pub site: SiteFilter,
    pub payload: PayloadRange,
}

impl Controls {
    /// All sites, payload slider at the observed payload bounds.
    pub fn initial(dataset: &LaunchDataset) -> Self {
        Controls {
            site: SiteFilter::All,
            payload: PayloadRange::observed(dataset),
        }
    }

    /// Store the event's value. Returns `false` when nothing changed.
    pub fn apply(&mut self, event: ControlEvent) -> bool {
        match event {
            ControlEvent::SiteSelected(site) if site != self.site => self.site = site,
            ControlEvent::PayloadRangeChanged(range) if range != self.payload => {
                self.payload = range
            }
            _ => return false,
        }
        true
    }
}

pub type Handler = fn(&LaunchDataset, &Controls) -> Figure;

/// Registry of `control → [(output, handler)]` routes.
#[derive(Clone, Default)]
pub struct Callbacks {
    routes: BTreeMap<ControlId, Vec<(OutputId, Handler)>>,
}

impl Callbacks {
    pub fn new() -> Self {
        Self::default()
    }

    /// The dashboard wiring: the site dropdown drives both charts, the
    /// payload slider only the scatter chart.
    pub fn dashboard() -> Self {
        let mut callbacks = Self::new();
        callbacks
            .register(ControlId::SiteDropdown, OutputId::SuccessPieChart, render_pie)
            .register(ControlId::SiteDropdown, OutputId::PayloadScatterChart, render_scatter)
            .register(ControlId::PayloadSlider, OutputId::PayloadScatterChart, render_scatter);
        callbacks
    }

    pub fn register(&mut self, control: ControlId, output: OutputId, handler: Handler) -> &mut Self {
        self.routes.entry(control).or_default().push((output, handler));
        self
    }

    /// Run every handler bound to `control`. Unbound controls render nothing.
    pub fn dispatch(
        &self,
        control: ControlId,
        dataset: &LaunchDataset,
        controls: &Controls,
    ) -> Vec<(OutputId, Figure)> {
        self.routes
            .get(&control)
            .into_iter()
            .flatten()
            .map(|(output, handler)| (*output, handler(dataset, controls)))
            .collect()
    }

    /// Render every output once, as on first page load. An output bound to
    /// several controls is rendered by the first handler registered for it.
    pub fn fire_all(&self, dataset: &LaunchDataset, controls: &Controls) -> BTreeMap<OutputId, Figure> {
        let mut figures = BTreeMap::new();
        for (output, handler) in self.routes.values().flatten() {
            figures
                .entry(*output)
                .or_insert_with(|| handler(dataset, controls));
        }
        figures
    }
}

fn render_pie(dataset: &LaunchDataset, controls: &Controls) -> Figure {
    Figure::Pie(chart::pie_figure(dataset, &controls.site))
}

fn render_scatter(dataset: &LaunchDataset, controls: &Controls) -> Figure {
    Figure::Scatter(chart::scatter_figure(dataset, &controls.site, controls.payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::two_sites;

    fn outputs(figures: &[(OutputId, Figure)]) -> Vec<OutputId> {
        figures.iter().map(|(id, _)| *id).collect()
    }

    #[test]
    fn test_dropdown_drives_both_charts() {
        let ds = two_sites();
        let controls = Controls::initial(&ds);
        let figures = Callbacks::dashboard().dispatch(ControlId::SiteDropdown, &ds, &controls);
        assert_eq!(
            outputs(&figures),
            vec![OutputId::SuccessPieChart, OutputId::PayloadScatterChart]
        );
    }

    #[test]
    fn test_slider_drives_scatter_only() {
        let ds = two_sites();
        let controls = Controls::initial(&ds);
        let figures = Callbacks::dashboard().dispatch(ControlId::PayloadSlider, &ds, &controls);
        assert_eq!(outputs(&figures), vec![OutputId::PayloadScatterChart]);
        assert!(matches!(figures[0].1, Figure::Scatter(_)));
    }

    #[test]
    fn test_unbound_control_renders_nothing() {
        let ds = two_sites();
        let controls = Controls::initial(&ds);
        assert!(Callbacks::new()
            .dispatch(ControlId::SiteDropdown, &ds, &controls)
            .is_empty());
    }

    #[test]
    fn test_fire_all_renders_each_output_once() {
        let ds = two_sites();
        let figures = Callbacks::dashboard().fire_all(&ds, &Controls::initial(&ds));
        assert_eq!(figures.len(), 2);
        assert!(matches!(figures[&OutputId::SuccessPieChart], Figure::Pie(_)));
        assert!(matches!(figures[&OutputId::PayloadScatterChart], Figure::Scatter(_)));
    }

    #[test]
    fn test_handlers_see_current_controls() {
        let ds = two_sites();
        let mut controls = Controls::initial(&ds);
        assert!(controls.apply(ControlEvent::SiteSelected(SiteFilter::Site("B".into()))));

        let figures = Callbacks::dashboard().dispatch(ControlId::SiteDropdown, &ds, &controls);
        let Figure::Pie(pie) = &figures[0].1 else {
            panic!("expected pie figure");
        };
        assert_eq!(pie.title, "Total Success Launches for the B");
    }

    #[test]
    fn test_apply_reports_changes() {
        let ds = two_sites();
        let mut controls = Controls::initial(&ds);
        assert_eq!(controls.payload, PayloadRange::new(500.0, 9600.0).unwrap());

        assert!(!controls.apply(ControlEvent::SiteSelected(SiteFilter::All)));
        let range = PayloadRange::new(0.0, 3000.0).unwrap();
        let event = ControlEvent::PayloadRangeChanged(range);
        assert_eq!(event.control(), ControlId::PayloadSlider);
        assert!(controls.apply(event.clone()));
        assert!(!controls.apply(event));
        assert_eq!(controls.payload, range);
    }

    #[test]
    fn test_ids() {
        assert_eq!(ControlId::SiteDropdown.id(), "site-dropdown");
        assert_eq!(OutputId::PayloadScatterChart.id(), "success-payload-scatter-chart");
    }
}
