//! Contiguous grouping of logged segments.
//!
//! Segments expanded from one repeat block share a group id. For display they
//! collapse into one averaged row per contiguous run of equal ids. Grouping is
//! order-sensitive and never re-sorts.

use std::ops::Range;

use serde::Serialize;

use crate::metrics::pace::pace_from;
use crate::recording::types::LogSegment;
use crate::workouts::types::StepKind;

/// Pace shown for an average that cannot be paced.
pub const NO_PACE: &str = "-";

/// A contiguous run of segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentGroup<'a> {
    /// Shared group id, `None` for an ungrouped singleton
    pub group_id: Option<&'a str>,
    /// Index of the first item in the source sequence
    pub start: usize,
    /// The segments, in order
    pub items: &'a [LogSegment],
}

/// Per-set averages of a group.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupAverages {
    /// Mean distance (km)
    pub distance: f64,
    /// Mean duration (seconds)
    pub duration: f64,
    /// Pace from the means, or "-"
    pub pace: String,
}

/// Human label for a collapsed group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetLabel {
    Interval,
    Tempo,
    Run,
    /// No running segment in the group
    Group,
}

impl SetLabel {
    /// Get display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            SetLabel::Interval => "Interval",
            SetLabel::Tempo => "Tempo",
            SetLabel::Run => "Run",
            SetLabel::Group => "Group",
        }
    }
}

impl std::fmt::Display for SetLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Partition segments into maximal contiguous runs of equal group id.
///
/// A segment without a group id is always its own group, even between two
/// segments that share an id.
pub fn group_contiguous(segments: &[LogSegment]) -> Vec<SegmentGroup<'_>> {
    let mut groups = Vec::new();
    let mut start = 0;

    while start < segments.len() {
        let group_id = segments[start].group_id.as_deref();
        let mut end = start + 1;

        if group_id.is_some() {
            while end < segments.len() && segments[end].group_id.as_deref() == group_id {
                end += 1;
            }
        }

        groups.push(SegmentGroup {
            group_id,
            start,
            items: &segments[start..end],
        });
        start = end;
    }

    groups
}

impl<'a> SegmentGroup<'a> {
    /// Number of segments.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the group has no segments.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Positions of the items in the source sequence.
    pub fn indices(&self) -> Range<usize> {
        self.start..self.start + self.items.len()
    }

    /// Whether the group renders as one averaged, expandable row.
    pub fn is_averaged(&self) -> bool {
        self.group_id.is_some() && self.items.len() > 1
    }

    fn effort_items(&self) -> Vec<&'a LogSegment> {
        self.items
            .iter()
            .filter(|s| !s.step_kind.is_recover())
            .collect()
    }

    /// Averages over the effort segments, or over everything for an all-recover group.
    pub fn averages(&self) -> GroupAverages {
        let efforts = self.effort_items();
        let calc: Vec<&LogSegment> = if efforts.is_empty() {
            self.items.iter().collect()
        } else {
            efforts
        };

        if calc.is_empty() {
            return GroupAverages {
                distance: 0.0,
                duration: 0.0,
                pace: NO_PACE.to_string(),
            };
        }

        let count = calc.len() as f64;
        let distance = calc.iter().map(|s| s.actual_distance).sum::<f64>() / count;
        let duration = calc.iter().map(|s| s.actual_duration).sum::<f64>() / count;

        GroupAverages {
            distance,
            duration,
            pace: pace_from(distance, duration)
                .unwrap_or_else(|| NO_PACE.to_string()),
        }
    }

    /// Label chosen from the first effort segment.
    pub fn label(&self) -> SetLabel {
        match self.effort_items().first().map(|s| s.step_kind) {
            Some(StepKind::Interval) => SetLabel::Interval,
            Some(StepKind::Tempo) => SetLabel::Tempo,
            Some(_) => SetLabel::Run,
            None => SetLabel::Group,
        }
    }

    /// Number of effort segments (the set count shown on a collapsed row).
    pub fn set_count(&self) -> usize {
        let efforts = self.effort_items().len();
        if efforts == 0 {
            self.items.len()
        } else {
            efforts
        }
    }
}
