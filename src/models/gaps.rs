//! Gap analysis model.
//!
//! The backend ships gaps as four parallel arrays. They are folded into one
//! `Vec<Gap>` of explicit variants as soon as the payload is decoded, so the
//! kind of a gap never depends on which array it happened to sit in later on.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Sort rank; lower comes first.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::High => "High Priority",
            Priority::Medium => "Medium Priority",
            Priority::Low => "Low Priority",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapKind {
    Technical,
    Experience,
    CompanyFit,
    Resume,
}

impl GapKind {
    pub const ALL: [GapKind; 4] = [
        GapKind::Technical,
        GapKind::Experience,
        GapKind::CompanyFit,
        GapKind::Resume,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            GapKind::Technical => "Technical",
            GapKind::Experience => "Experience",
            GapKind::CompanyFit => "Company Fit",
            GapKind::Resume => "Resume",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            GapKind::Technical => "💻",
            GapKind::Experience => "🚀",
            GapKind::CompanyFit => "🤝",
            GapKind::Resume => "📝",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GapKind::Technical => "technical",
            GapKind::Experience => "experience",
            GapKind::CompanyFit => "company_fit",
            GapKind::Resume => "resume",
        }
    }
}

impl fmt::Display for GapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields every gap carries regardless of kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapCommon {
    pub gap_id: String,
    #[serde(default)]
    pub category: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub priority: Priority,
    #[serde(default)]
    pub priority_reasoning: String,
    #[serde(default)]
    pub impact_on_application: String,
}

impl GapCommon {
    /// `technical_skills` → `technical skills`
    pub fn category_label(&self) -> String {
        self.category.replace('_', " ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(rename = "type", default)]
    pub resource_type: String,
    pub name: String,
    #[serde(default = "default_resource_url")]
    pub url: String,
    #[serde(default)]
    pub estimated_time: String,
    #[serde(default)]
    pub notes: String,
}

fn default_resource_url() -> String {
    "Search online".to_string()
}

impl Resource {
    /// The backend uses the literal `Search online` when it has no link.
    pub fn link(&self) -> Option<&str> {
        let url = self.url.trim();
        (!url.is_empty() && url != "Search online").then_some(url)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub action: String,
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub success_criteria: String,
    #[serde(default)]
    pub estimated_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectIdea {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub key_features: Vec<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub estimated_time: String,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub portfolio_value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceRecommendation {
    pub action: String,
    #[serde(default)]
    pub project_ideas: Vec<ProjectIdea>,
    #[serde(default)]
    pub success_criteria: String,
    #[serde(default)]
    pub estimated_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeRecommendation {
    pub action: String,
    #[serde(default)]
    pub before_example: Option<String>,
    #[serde(default)]
    pub after_example: Option<String>,
    #[serde(default)]
    pub success_criteria: String,
    #[serde(default)]
    pub estimated_time: String,
}

/// Company-fit advice has no fixed schema upstream; keep the common keys
/// and whatever else came along.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CompanyFitRecommendation {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub success_criteria: Option<String>,
    #[serde(default)]
    pub estimated_time: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalGap {
    #[serde(flatten)]
    pub common: GapCommon,
    #[serde(default)]
    pub current_level: String,
    #[serde(default)]
    pub target_level: String,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceGap {
    #[serde(flatten)]
    pub common: GapCommon,
    #[serde(default)]
    pub recommendations: Vec<ExperienceRecommendation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyFitGap {
    #[serde(flatten)]
    pub common: GapCommon,
    #[serde(default)]
    pub company_value: String,
    #[serde(default)]
    pub recommendations: Vec<CompanyFitRecommendation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeGap {
    #[serde(flatten)]
    pub common: GapCommon,
    #[serde(default)]
    pub recommendations: Vec<ResumeRecommendation>,
}

/// One gap, tagged with its kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Gap {
    Technical(TechnicalGap),
    Experience(ExperienceGap),
    CompanyFit(CompanyFitGap),
    Resume(ResumeGap),
}

impl Gap {
    pub fn kind(&self) -> GapKind {
        match self {
            Gap::Technical(_) => GapKind::Technical,
            Gap::Experience(_) => GapKind::Experience,
            Gap::CompanyFit(_) => GapKind::CompanyFit,
            Gap::Resume(_) => GapKind::Resume,
        }
    }

    pub fn common(&self) -> &GapCommon {
        match self {
            Gap::Technical(g) => &g.common,
            Gap::Experience(g) => &g.common,
            Gap::CompanyFit(g) => &g.common,
            Gap::Resume(g) => &g.common,
        }
    }

    pub fn priority(&self) -> Priority {
        self.common().priority
    }

    pub fn gap_id(&self) -> &str {
        &self.common().gap_id
    }

    pub fn title(&self) -> &str {
        &self.common().title
    }

    pub fn recommendation_count(&self) -> usize {
        match self {
            Gap::Technical(g) => g.recommendations.len(),
            Gap::Experience(g) => g.recommendations.len(),
            Gap::CompanyFit(g) => g.recommendations.len(),
            Gap::Resume(g) => g.recommendations.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickWin {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub impact: String,
    #[serde(default)]
    pub estimated_time: String,
    #[serde(default)]
    pub steps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GapAnalysisSummary {
    #[serde(default)]
    pub total_gaps: usize,
    #[serde(default)]
    pub high_priority_count: usize,
    #[serde(default)]
    pub medium_priority_count: usize,
    #[serde(default)]
    pub low_priority_count: usize,
    #[serde(default)]
    pub estimated_preparation_time: String,
    #[serde(default)]
    pub overall_assessment: String,
}

impl GapAnalysisSummary {
    /// Counts derived from the gaps themselves, used when the backend
    /// omitted its own summary.
    pub fn from_gaps(gaps: &[Gap]) -> Self {
        let count = |p: Priority| gaps.iter().filter(|g| g.priority() == p).count();
        Self {
            total_gaps: gaps.len(),
            high_priority_count: count(Priority::High),
            medium_priority_count: count(Priority::Medium),
            low_priority_count: count(Priority::Low),
            estimated_preparation_time: String::new(),
            overall_assessment: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DevelopmentMilestone {
    pub milestone: String,
    #[serde(default)]
    pub estimated_time: String,
    #[serde(default)]
    pub success_criteria: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongTermDevelopment {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub rationale: String,
    #[serde(default)]
    pub estimated_time: String,
    #[serde(default)]
    pub milestones: Vec<DevelopmentMilestone>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseAction {
    pub action: String,
    #[serde(default)]
    pub gap_ids: Vec<String>,
    #[serde(default)]
    pub estimated_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DevelopmentPhase {
    #[serde(default)]
    pub timeframe: String,
    #[serde(default)]
    pub focus: String,
    #[serde(default)]
    pub actions: Vec<PhaseAction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrioritizedActionPlan {
    pub phase_1_immediate: DevelopmentPhase,
    pub phase_2_short_term: DevelopmentPhase,
    pub phase_3_medium_term: DevelopmentPhase,
}

impl PrioritizedActionPlan {
    pub fn phases(&self) -> [(&'static str, &DevelopmentPhase); 3] {
        [
            ("Immediate", &self.phase_1_immediate),
            ("Short term", &self.phase_2_short_term),
            ("Medium term", &self.phase_3_medium_term),
        ]
    }
}

/// Gap analysis with gaps already tagged by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireGapAnalysis", into = "WireGapAnalysis")]
pub struct GapAnalysis {
    pub summary: GapAnalysisSummary,
    /// Technical, then experience, then company fit, then résumé gaps, each
    /// group in backend order.
    pub gaps: Vec<Gap>,
    pub quick_wins: Vec<QuickWin>,
    pub long_term_development: Vec<LongTermDevelopment>,
    pub prioritized_action_plan: Option<PrioritizedActionPlan>,
}

impl GapAnalysis {
    pub fn is_empty(&self) -> bool {
        self.gaps.is_empty()
    }

    pub fn gaps_of(&self, kind: GapKind) -> impl Iterator<Item = &Gap> {
        self.gaps.iter().filter(move |g| g.kind() == kind)
    }

    /// Look up a gap by id, e.g. to resolve a timeline task's references.
    pub fn find(&self, gap_id: &str) -> Option<&Gap> {
        self.gaps.iter().find(|g| g.gap_id() == gap_id)
    }
}

/// Shape of the payload on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireGapAnalysis {
    #[serde(default)]
    summary: Option<GapAnalysisSummary>,
    #[serde(default)]
    technical_gaps: Vec<TechnicalGap>,
    #[serde(default)]
    experience_gaps: Vec<ExperienceGap>,
    #[serde(default)]
    company_fit_gaps: Vec<CompanyFitGap>,
    #[serde(default)]
    resume_optimization_gaps: Vec<ResumeGap>,
    #[serde(default)]
    quick_wins: Vec<QuickWin>,
    #[serde(default)]
    long_term_development: Vec<LongTermDevelopment>,
    #[serde(default)]
    prioritized_action_plan: Option<PrioritizedActionPlan>,
}

impl From<WireGapAnalysis> for GapAnalysis {
    fn from(wire: WireGapAnalysis) -> Self {
        let gaps: Vec<Gap> = wire
            .technical_gaps
            .into_iter()
            .map(Gap::Technical)
            .chain(wire.experience_gaps.into_iter().map(Gap::Experience))
            .chain(wire.company_fit_gaps.into_iter().map(Gap::CompanyFit))
            .chain(wire.resume_optimization_gaps.into_iter().map(Gap::Resume))
            .collect();

        let summary = wire
            .summary
            .unwrap_or_else(|| GapAnalysisSummary::from_gaps(&gaps));

        GapAnalysis {
            summary,
            gaps,
            quick_wins: wire.quick_wins,
            long_term_development: wire.long_term_development,
            prioritized_action_plan: wire.prioritized_action_plan,
        }
    }
}

impl From<GapAnalysis> for WireGapAnalysis {
    fn from(analysis: GapAnalysis) -> Self {
        let mut wire = WireGapAnalysis {
            summary: Some(analysis.summary),
            technical_gaps: Vec::new(),
            experience_gaps: Vec::new(),
            company_fit_gaps: Vec::new(),
            resume_optimization_gaps: Vec::new(),
            quick_wins: analysis.quick_wins,
            long_term_development: analysis.long_term_development,
            prioritized_action_plan: analysis.prioritized_action_plan,
        };
        for gap in analysis.gaps {
            match gap {
                Gap::Technical(g) => wire.technical_gaps.push(g),
                Gap::Experience(g) => wire.experience_gaps.push(g),
                Gap::CompanyFit(g) => wire.company_fit_gaps.push(g),
                Gap::Resume(g) => wire.resume_optimization_gaps.push(g),
            }
        }
        wire
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{
        "summary": {
            "total_gaps": 3,
            "high_priority_count": 1,
            "medium_priority_count": 1,
            "low_priority_count": 1,
            "estimated_preparation_time": "6 weeks",
            "overall_assessment": "Solid base"
        },
        "resume_optimization_gaps": [
            {"gap_id": "res_001", "category": "keywords", "title": "Missing keywords",
             "description": "", "priority": "low", "priority_reasoning": "",
             "impact_on_application": "",
             "recommendations": [{"action": "Add keywords", "before_example": "Did stuff",
                                  "after_example": "Shipped X", "success_criteria": "", "estimated_time": "1h"}]}
        ],
        "technical_gaps": [
            {"gap_id": "tech_001", "category": "frameworks", "title": "No React",
             "description": "d", "priority": "high", "priority_reasoning": "r",
             "current_level": "none", "target_level": "intermediate",
             "impact_on_application": "i",
             "recommendations": [{"action": "Learn React", "resources": [
                 {"type": "course", "name": "React docs", "estimated_time": "10h", "notes": ""}
             ], "success_criteria": "Build app", "estimated_time": "2 weeks"}]}
        ],
        "company_fit_gaps": [
            {"gap_id": "fit_001", "category": "leadership", "title": "Ownership",
             "description": "", "priority": "medium", "priority_reasoning": "",
             "company_value": "Ownership", "impact_on_application": "",
             "recommendations": [{"action": "Lead a project", "stakeholders": ["team"]}]}
        ]
    }"#;

    #[test]
    fn test_gaps_are_tagged_at_ingestion_in_kind_order() {
        let analysis: GapAnalysis = serde_json::from_str(PAYLOAD).unwrap();
        let kinds: Vec<GapKind> = analysis.gaps.iter().map(Gap::kind).collect();
        assert_eq!(kinds, vec![GapKind::Technical, GapKind::CompanyFit, GapKind::Resume]);
        assert_eq!(analysis.find("fit_001").map(Gap::priority), Some(Priority::Medium));
    }

    #[test]
    fn test_resource_without_url_has_no_link() {
        let analysis: GapAnalysis = serde_json::from_str(PAYLOAD).unwrap();
        match &analysis.gaps[0] {
            Gap::Technical(g) => {
                let resource = &g.recommendations[0].resources[0];
                assert_eq!(resource.url, "Search online");
                assert_eq!(resource.link(), None);
            }
            other => panic!("expected technical gap, got {:?}", other.kind()),
        }
    }

    #[test]
    fn test_flexible_company_fit_recommendations_keep_extra_keys() {
        let analysis: GapAnalysis = serde_json::from_str(PAYLOAD).unwrap();
        match analysis.find("fit_001") {
            Some(Gap::CompanyFit(g)) => {
                assert_eq!(g.recommendations[0].action.as_deref(), Some("Lead a project"));
                assert!(g.recommendations[0].extra.contains_key("stakeholders"));
            }
            _ => panic!("company fit gap missing"),
        }
    }

    #[test]
    fn test_missing_summary_is_derived() {
        let json = r#"{"experience_gaps": [
            {"gap_id": "exp_1", "title": "No internship", "priority": "high"},
            {"gap_id": "exp_2", "title": "No projects", "priority": "high"}
        ]}"#;
        let analysis: GapAnalysis = serde_json::from_str(json).unwrap();
        assert_eq!(analysis.summary.total_gaps, 2);
        assert_eq!(analysis.summary.high_priority_count, 2);
        assert!(analysis.quick_wins.is_empty());
    }

    #[test]
    fn test_serializes_back_to_wire_shape() {
        let analysis: GapAnalysis = serde_json::from_str(PAYLOAD).unwrap();
        let value = serde_json::to_value(&analysis).unwrap();
        assert_eq!(value["technical_gaps"].as_array().map(Vec::len), Some(1));
        assert_eq!(value["resume_optimization_gaps"][0]["gap_id"], "res_001");
    }

    #[test]
    fn test_category_label() {
        let analysis: GapAnalysis = serde_json::from_str(
            r#"{"technical_gaps": [{"gap_id": "t", "category": "technical_skills", "title": "x", "priority": "low"}]}"#,
        )
        .unwrap();
        assert_eq!(analysis.gaps[0].common().category_label(), "technical skills");
    }
}
