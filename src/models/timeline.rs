//! Week-ranged preparation plan

use crate::models::gaps::Priority;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub task_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Gaps this task addresses. Weak references: an id may name a gap that
    /// is not part of the current payload.
    #[serde(default)]
    pub gap_ids: Vec<String>,
    #[serde(default)]
    pub estimated_hours: u32,
    pub priority: Priority,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub resources: Vec<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    pub success_criteria: Vec<String>,
}

/// `success_criteria` arrives either as one sentence or as a list.
fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
        Missing(Option<()>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(s) if s.trim().is_empty() => Vec::new(),
        OneOrMany::One(s) => vec![s],
        OneOrMany::Many(v) => v,
        OneOrMany::Missing(_) => Vec::new(),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub milestone_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub target_date: Option<String>,
    #[serde(default)]
    pub completion_criteria: Vec<String>,
    #[serde(default)]
    pub deliverables: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelinePhase {
    pub phase_id: String,
    pub phase_number: u32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub start_week: u32,
    pub end_week: u32,
    #[serde(default)]
    pub focus_areas: Vec<String>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
    #[serde(default)]
    pub estimated_hours_per_week: u32,
    #[serde(default)]
    pub success_metrics: Vec<String>,
}

impl TimelinePhase {
    pub fn week_range(&self) -> String {
        format!("Weeks {}-{}", self.start_week, self.end_week)
    }

    pub fn total_task_hours(&self) -> u32 {
        self.tasks.iter().map(|t| t.estimated_hours).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklySummary {
    pub week_number: u32,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub phase: String,
    #[serde(default)]
    pub focus: String,
    #[serde(default)]
    pub tasks: Vec<String>,
    #[serde(default)]
    pub estimated_hours: u32,
    #[serde(default)]
    pub key_deliverable: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Light,
    Moderate,
    Intensive,
}

impl Intensity {
    pub fn as_upper(&self) -> &'static str {
        match self {
            Intensity::Light => "LIGHT",
            Intensity::Moderate => "MODERATE",
            Intensity::Intensive => "INTENSIVE",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineMetadata {
    pub total_weeks: u32,
    #[serde(default)]
    pub total_hours: u32,
    #[serde(default)]
    pub hours_per_week: u32,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub target_deadline: Option<String>,
    pub intensity_level: Intensity,
    #[serde(default)]
    pub feasibility_assessment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineResult {
    pub metadata: TimelineMetadata,
    #[serde(default)]
    pub phases: Vec<TimelinePhase>,
    #[serde(default)]
    pub weekly_breakdown: Vec<WeeklySummary>,
    #[serde(default)]
    pub critical_path: Vec<String>,
    #[serde(default)]
    pub flexibility_notes: Vec<String>,
    #[serde(default)]
    pub motivation_tips: Vec<String>,
}

impl TimelineResult {
    pub fn find_task(&self, task_id: &str) -> Option<&Task> {
        self.phases
            .iter()
            .flat_map(|p| p.tasks.iter())
            .find(|t| t.task_id == task_id)
    }

    /// Critical path as task titles; ids with no matching task are shown as-is.
    pub fn critical_path_titles(&self) -> Vec<String> {
        self.critical_path
            .iter()
            .map(|id| {
                self.find_task(id)
                    .map(|t| t.title.clone())
                    .unwrap_or_else(|| id.clone())
            })
            .collect()
    }
}
