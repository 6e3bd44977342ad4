use super::tween::Tween;
use crate::scale::{self, PlotPoint};

/// A labeled callout circling a cluster of marks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnotationDescriptor {
    pub id: &'static str,
    /// Anchor in data space: (city MPG, highway MPG).
    pub anchor: (f64, f64),
    /// Offset from the anchor to the note, in plot units.
    pub callout_offset: (f64, f64),
    /// Radius of the subject circle, in plot units.
    pub radius: f64,
    pub title: &'static str,
    pub label: &'static str,
}

impl AnnotationDescriptor {
    pub fn anchor_point(&self) -> PlotPoint {
        scale::project(self.anchor.0, self.anchor.1)
    }

    pub fn note_point(&self) -> PlotPoint {
        let anchor = self.anchor_point();
        PlotPoint::new(
            anchor.x + self.callout_offset.0,
            anchor.y + self.callout_offset.1,
        )
    }

    /// Where the connector leaves the subject circle on its way to the note.
    pub fn connector_start(&self) -> PlotPoint {
        let anchor = self.anchor_point();
        let note = self.note_point();
        let length = anchor.distance(note);
        if length <= self.radius || length == 0.0 {
            return anchor;
        }
        let scale = self.radius / length;
        PlotPoint::new(
            (note.x - anchor.x).mul_add(scale, anchor.x),
            (note.y - anchor.y).mul_add(scale, anchor.y),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnnotationHandle(pub(crate) u64);

#[derive(Debug, Clone)]
pub struct ActiveAnnotation {
    pub handle: AnnotationHandle,
    pub descriptor: &'static AnnotationDescriptor,
    pub opacity: Tween,
}

/// Greedy word wrap for note labels drawn on the chart canvas.
pub fn wrap_label(label: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in label.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
