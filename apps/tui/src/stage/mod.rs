// Render-tree model for the presentation.
// The terminal view draws a Stage every frame; scene routines mutate it.

pub mod annotation;
pub mod palette;
pub mod panel;
pub mod tween;

use std::sync::Arc;
use std::time::Duration;

use ratatui::style::Color;
use tokio::time::Instant;

use crate::domain::{Fuel, VehicleRecord};
use crate::filter::Filter;
use crate::scale::{self, PlotPoint};

pub use annotation::{ActiveAnnotation, AnnotationDescriptor, AnnotationHandle};
pub use panel::{Container, TextPanel, SEPARATOR};
pub use tween::{Transition, Tween, OPAQUE, TRANSPARENT};

/// Opacity the legend filter leaves non-matching marks at.
pub const LEGEND_FADED_OPACITY: f64 = 0.05;
pub const LEGEND_FADE: Duration = Duration::from_millis(50);

/// Consumed by the slide controller to change how marks are drawn.
pub trait ChartRenderer {
    fn render(&mut self, records: Arc<[VehicleRecord]>);
    fn set_mark_opacity(&mut self, filter: &Filter, opacity: f64, duration: Duration)
        -> Transition;
    fn reset_all_opacity(&mut self, duration: Duration) -> Transition;
    fn color_of(&self, fuel: Fuel) -> Color;
    fn attach_hover(&mut self);
    fn detach_hover(&mut self);
}

/// Consumed by the slide controller to place callouts on the chart.
pub trait AnnotationRenderer {
    fn show(&mut self, descriptor: &'static AnnotationDescriptor, fade: Duration)
        -> AnnotationHandle;
    fn hide(&mut self, handle: AnnotationHandle, opacity: f64, fade: Duration) -> Transition;
    fn remove(&mut self, handle: AnnotationHandle);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    /// Move on to the next scene.
    Advance,
    /// Run the current scene's reveal routine.
    Reveal,
}

/// The gating "continue" button a scene installs into the sidebar.
#[derive(Debug, Clone)]
pub struct Control {
    pub label: &'static str,
    pub action: ControlAction,
    pub opacity: Tween,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextLabel {
    Arrow,
    Restart,
}

impl NextLabel {
    pub const fn text(self) -> &'static str {
        match self {
            Self::Arrow => "\u{2192}",
            Self::Restart => "Restart Presentation",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavBar {
    pub visible: bool,
    pub next_label: NextLabel,
}

impl Default for NavBar {
    fn default() -> Self {
        Self {
            visible: false,
            next_label: NextLabel::Arrow,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Finding {
    pub text: &'static str,
    pub opacity: Tween,
}

/// Pointer position in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pointer {
    pub column: u16,
    pub row: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverEvent {
    Enter(usize, Pointer),
    Move(usize, Pointer),
    Leave,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tooltip {
    pub mark: usize,
    pub record: VehicleRecord,
    pub pointer: Pointer,
}

/// Interactive mode installed by the final scene.
#[derive(Debug, Clone, Default)]
pub struct ExploreMode {
    pub legend_filter: Option<Fuel>,
    pub hover_attached: bool,
    pub tooltip: Option<Tooltip>,
}

#[derive(Debug, Clone)]
pub struct Stage {
    pub title: String,
    narrative: TextPanel,
    conclusion_header: TextPanel,
    conclusion: TextPanel,
    pub findings: Vec<Finding>,
    pub control: Option<Control>,
    pub nav: NavBar,
    records: Arc<[VehicleRecord]>,
    marks: Vec<Tween>,
    annotations: Vec<ActiveAnnotation>,
    next_handle: u64,
    pub explore: Option<ExploreMode>,
}

impl Stage {
    pub fn new(records: Arc<[VehicleRecord]>) -> Self {
        let mut stage = Self {
            title: String::new(),
            narrative: TextPanel::default(),
            conclusion_header: TextPanel::default(),
            conclusion: TextPanel::default(),
            findings: Vec::new(),
            control: None,
            nav: NavBar::default(),
            records: Arc::from(Vec::new()),
            marks: Vec::new(),
            annotations: Vec::new(),
            next_handle: 0,
            explore: None,
        };
        stage.render(records);
        stage
    }

    pub fn records(&self) -> &[VehicleRecord] {
        &self.records
    }

    pub const fn panel(&self, container: Container) -> &TextPanel {
        match container {
            Container::Narrative => &self.narrative,
            Container::ConclusionHeader => &self.conclusion_header,
            Container::Conclusion => &self.conclusion,
        }
    }

    pub fn panel_mut(&mut self, container: Container) -> &mut TextPanel {
        match container {
            Container::Narrative => &mut self.narrative,
            Container::ConclusionHeader => &mut self.conclusion_header,
            Container::Conclusion => &mut self.conclusion,
        }
    }

    pub fn mark_opacity(&self, index: usize, now: Instant) -> Option<f64> {
        self.marks.get(index).map(|tween| tween.value_at(now))
    }

    /// Opacity each mark is heading toward, ignoring animation progress.
    #[cfg(test)]
    fn mark_target(&self, index: usize) -> Option<f64> {
        self.marks.get(index).map(Tween::target)
    }

    pub fn annotations(&self) -> &[ActiveAnnotation] {
        &self.annotations
    }

    pub fn annotation(&self, handle: AnnotationHandle) -> Option<&ActiveAnnotation> {
        self.annotations.iter().find(|a| a.handle == handle)
    }

    /// True when nothing scene-specific is left on the stage.
    pub fn is_clear(&self) -> bool {
        self.title.is_empty()
            && self.narrative.is_empty()
            && self.conclusion_header.is_empty()
            && self.conclusion.is_empty()
            && self.findings.is_empty()
            && self.annotations.is_empty()
            && self.control.is_none()
            && !self.nav.visible
            && self.explore.is_none()
    }

    /// Clears every scene-specific element and fades all marks back in.
    pub fn reset_transient(&mut self, fade: Duration) -> Transition {
        self.title.clear();
        self.narrative.clear();
        self.conclusion_header.clear();
        self.conclusion.clear();
        self.findings.clear();
        self.control = None;
        self.nav = NavBar::default();
        self.annotations.clear();
        self.detach_hover();
        self.explore = None;
        self.reset_all_opacity(fade)
    }

    pub fn install_control(&mut self, label: &'static str, action: ControlAction, fade: Duration) {
        let now = Instant::now();
        let mut opacity = Tween::fixed(TRANSPARENT, now);
        opacity.retarget(OPAQUE, fade, now);
        self.control = Some(Control {
            label,
            action,
            opacity,
        });
    }

    pub fn show_findings(&mut self, items: &[&'static str], fade: Duration) -> Transition {
        let now = Instant::now();
        self.findings = items
            .iter()
            .map(|text| {
                let mut opacity = Tween::fixed(TRANSPARENT, now);
                opacity.retarget(OPAQUE, fade, now);
                Finding { text, opacity }
            })
            .collect();
        Transition::until(now + fade)
    }

    pub fn show_nav(&mut self, next_label: NextLabel) {
        self.nav = NavBar {
            visible: true,
            next_label,
        };
    }

    pub fn enable_explore(&mut self) {
        self.explore = Some(ExploreMode::default());
        self.attach_hover();
    }

    /// Shows only marks of `fuel`, always starting from the full dataset so
    /// successive clicks never compound. Clicking the active fuel again shows
    /// everything. Returns false outside explore mode.
    pub fn apply_legend_filter(&mut self, fuel: Fuel) -> bool {
        let Some(explore) = self.explore.as_mut() else {
            return false;
        };
        let next = if explore.legend_filter == Some(fuel) {
            None
        } else {
            Some(fuel)
        };
        explore.legend_filter = next;

        self.reset_all_opacity(LEGEND_FADE);
        if let Some(fuel) = next {
            self.set_mark_opacity(&Filter::FuelIsNot(fuel), LEGEND_FADED_OPACITY, LEGEND_FADE);
        }
        true
    }

    pub fn hover(&mut self, event: HoverEvent) {
        let Some(explore) = self.explore.as_mut() else {
            return;
        };
        if !explore.hover_attached {
            return;
        }
        explore.tooltip = match event {
            HoverEvent::Enter(mark, pointer) | HoverEvent::Move(mark, pointer) => self
                .records
                .get(mark)
                .map(|record| Tooltip {
                    mark,
                    record: *record,
                    pointer,
                }),
            HoverEvent::Leave => None,
        };
    }

    /// Index of the mark closest to `point`, if any lies within `tolerance`
    /// plot units of its edge.
    pub fn mark_near(&self, point: PlotPoint, tolerance: f64) -> Option<usize> {
        self.records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let distance = scale::project_record(record).distance(point)
                    - scale::mark_radius(record.cylinders);
                (index, distance)
            })
            .filter(|(_, distance)| *distance <= tolerance)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(index, _)| index)
    }

    fn next_handle(&mut self) -> AnnotationHandle {
        self.next_handle += 1;
        AnnotationHandle(self.next_handle)
    }
}

impl ChartRenderer for Stage {
    fn render(&mut self, records: Arc<[VehicleRecord]>) {
        let now = Instant::now();
        self.marks = vec![Tween::fixed(TRANSPARENT, now); records.len()];
        self.records = records;
    }

    fn set_mark_opacity(
        &mut self,
        filter: &Filter,
        opacity: f64,
        duration: Duration,
    ) -> Transition {
        let now = Instant::now();
        for (record, tween) in self.records.iter().zip(self.marks.iter_mut()) {
            if filter.matches(record) {
                tween.retarget(opacity, duration, now);
            }
        }
        Transition::until(now + duration)
    }

    fn reset_all_opacity(&mut self, duration: Duration) -> Transition {
        self.set_mark_opacity(&Filter::All, OPAQUE, duration)
    }

    fn color_of(&self, fuel: Fuel) -> Color {
        palette::fuel_color(fuel)
    }

    fn attach_hover(&mut self) {
        if let Some(explore) = self.explore.as_mut() {
            explore.hover_attached = true;
        }
    }

    fn detach_hover(&mut self) {
        if let Some(explore) = self.explore.as_mut() {
            explore.hover_attached = false;
            explore.tooltip = None;
        }
    }
}

impl AnnotationRenderer for Stage {
    fn show(&mut self, descriptor: &'static AnnotationDescriptor, fade: Duration) -> AnnotationHandle {
        let now = Instant::now();
        let handle = self.next_handle();
        let mut opacity = Tween::fixed(TRANSPARENT, now);
        opacity.retarget(OPAQUE, fade, now);
        self.annotations.push(ActiveAnnotation {
            handle,
            descriptor,
            opacity,
        });
        handle
    }

    fn hide(&mut self, handle: AnnotationHandle, opacity: f64, fade: Duration) -> Transition {
        let now = Instant::now();
        match self.annotations.iter_mut().find(|a| a.handle == handle) {
            Some(annotation) => {
                annotation.opacity.retarget(opacity, fade, now);
                Transition::until(now + fade)
            }
            None => Transition::done(now),
        }
    }

    fn remove(&mut self, handle: AnnotationHandle) {
        self.annotations.retain(|a| a.handle != handle);
    }
}
