//! Visibility and shaping of the report's secondary sections

use crate::models::results::MatchAnalysis;
use crate::models::timeline::{TimelinePhase, TimelineResult};

#[derive(Debug, Clone, PartialEq)]
pub struct StrengthGroup<'a> {
    pub heading: &'static str,
    pub icon: &'static str,
    pub items: &'a [String],
}

#[derive(Debug, Clone, PartialEq)]
pub struct StrengthsView<'a> {
    pub groups: Vec<StrengthGroup<'a>>,
    pub highlights: &'a [String],
}

impl<'a> StrengthsView<'a> {
    /// `None` when there is no match analysis or nothing to list.
    pub fn build(analysis: Option<&'a MatchAnalysis>) -> Option<Self> {
        let analysis = analysis?;
        let groups: Vec<StrengthGroup<'a>> = analysis
            .categories()
            .into_iter()
            .filter(|c| !c.detail.strengths.is_empty())
            .map(|c| StrengthGroup {
                heading: c.strengths_heading,
                icon: c.icon,
                items: &c.detail.strengths,
            })
            .collect();
        let highlights = analysis.overall_score.key_strengths.as_slice();

        if groups.is_empty() && highlights.is_empty() {
            None
        } else {
            Some(Self { groups, highlights })
        }
    }
}

/// One-line summary under a phase title.
pub fn phase_summary(phase: &TimelinePhase) -> String {
    format!(
        "{} • {} tasks • {} hrs/week",
        phase.week_range(),
        phase.tasks.len(),
        phase.estimated_hours_per_week
    )
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimelineView<'a> {
    pub timeline: &'a TimelineResult,
    pub critical_path: Vec<String>,
}

impl<'a> TimelineView<'a> {
    pub fn build(timeline: Option<&'a TimelineResult>) -> Option<Self> {
        let timeline = timeline?;
        Some(Self {
            critical_path: timeline.critical_path_titles(),
            timeline,
        })
    }

    pub fn has_extras(&self) -> bool {
        !self.timeline.flexibility_notes.is_empty() || !self.timeline.motivation_tips.is_empty()
    }
}

pub const FLEXIBILITY_HEADING: &str = "🔄 Flexibility Options";
pub const MOTIVATION_HEADING: &str = "💪 Staying Motivated";
