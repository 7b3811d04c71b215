//! Fit report assembled from a results payload.
//!
//! Every section is optional and only present when the payload carries the
//! data behind it. Formatters never look at the raw `ResultsResponse`.

use crate::models::gaps::{
    Gap, GapAnalysisSummary, LongTermDevelopment, PrioritizedActionPlan, QuickWin,
};
use crate::models::results::{ResultsResponse, ResultsStatus, ScoreDetail};
use crate::models::timeline::TimelineResult;
use crate::view::gap_filter::{GapFilter, GapsView};
use crate::view::score::ScoreBand;
use crate::view::sections::{StrengthsView, TimelineView};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ResultsReport {
    pub session_id: String,
    /// Session id as shown in the header, e.g. `0f8fad5b...`.
    pub short_session: String,
    pub status: ResultsStatus,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub message: String,
    pub overall: Option<OverallCard>,
    pub score_breakdown: Option<Vec<CategoryScore>>,
    pub strengths: Option<StrengthsSummary>,
    pub gaps: Option<GapsSection>,
    pub timeline: Option<TimelineSection>,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct OverallCard {
    pub score: u32,
    pub label: &'static str,
    pub description: &'static str,
    #[serde(skip)]
    pub band: ScoreBand,
    pub partial: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryScore {
    pub title: &'static str,
    pub icon: &'static str,
    #[serde(flatten)]
    pub detail: ScoreDetail,
}

#[derive(Debug, Clone, Serialize)]
pub struct StrengthGroup {
    pub heading: &'static str,
    pub icon: &'static str,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StrengthsSummary {
    pub groups: Vec<StrengthGroup>,
    pub key_highlights: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FilterSummary {
    pub gap_type: String,
    pub priority: String,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct GapsSection {
    pub summary: GapAnalysisSummary,
    pub quick_wins: Vec<QuickWin>,
    pub filter: FilterSummary,
    pub total_gaps: usize,
    /// Filtered, priority-ordered. Empty means the filters matched nothing.
    pub gaps: Vec<Gap>,
    pub long_term_development: Vec<LongTermDevelopment>,
    pub action_plan: Option<PrioritizedActionPlan>,
}

impl GapsSection {
    pub fn has_matches(&self) -> bool {
        !self.gaps.is_empty()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TimelineSection {
    #[serde(flatten)]
    pub plan: TimelineResult,
    /// Critical path with task ids resolved to titles.
    pub critical_path_titles: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub client_version: String,
    pub backend_url: Option<String>,
}

impl ResultsReport {
    pub fn build(results: &ResultsResponse, filter: &GapFilter) -> Self {
        let overall = results.overall_score.map(|score| {
            let band = ScoreBand::from_score(score);
            OverallCard {
                score,
                label: band.label(),
                description: band.description(),
                band,
                partial: results.is_partial(),
            }
        });

        let score_breakdown = results.match_analysis.as_ref().map(|analysis| {
            analysis
                .categories()
                .iter()
                .map(|c| CategoryScore {
                    title: c.title,
                    icon: c.icon,
                    detail: c.detail.clone(),
                })
                .collect()
        });

        let strengths = StrengthsView::build(results.match_analysis.as_ref()).map(|view| {
            StrengthsSummary {
                groups: view
                    .groups
                    .iter()
                    .map(|g| StrengthGroup {
                        heading: g.heading,
                        icon: g.icon,
                        items: g.items.to_vec(),
                    })
                    .collect(),
                key_highlights: view.highlights.to_vec(),
            }
        });

        let gaps = match (GapsView::build(results.gap_analysis.as_ref(), filter), &results.gap_analysis) {
            (GapsView::Hidden, _) | (_, None) => None,
            (view, Some(analysis)) => Some(GapsSection {
                summary: analysis.summary.clone(),
                quick_wins: analysis.quick_wins.clone(),
                filter: FilterSummary {
                    gap_type: filter.kind.label().to_string(),
                    priority: filter.priority.label().to_string(),
                    active: filter.is_active(),
                },
                total_gaps: analysis.gaps.len(),
                gaps: view.gaps().iter().map(|g| (*g).clone()).collect(),
                long_term_development: analysis.long_term_development.clone(),
                action_plan: analysis.prioritized_action_plan.clone(),
            }),
        };

        let timeline = TimelineView::build(results.timeline.as_ref()).map(|view| TimelineSection {
            plan: view.timeline.clone(),
            critical_path_titles: view.critical_path,
        });

        Self {
            session_id: results.session_id.clone(),
            short_session: results.short_session(),
            status: results.status,
            message: results.message.clone(),
            overall,
            score_breakdown,
            strengths,
            gaps,
            timeline,
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                client_version: env!("CARGO_PKG_VERSION").to_string(),
                backend_url: None,
            },
        }
    }

    pub fn with_backend_url(mut self, url: &str) -> Self {
        self.metadata.backend_url = Some(url.to_string());
        self
    }

    pub fn is_partial(&self) -> bool {
        self.status == ResultsStatus::Partial
    }

    /// True when nothing beyond the header would be rendered.
    pub fn is_empty(&self) -> bool {
        self.overall.is_none()
            && self.score_breakdown.is_none()
            && self.strengths.is_none()
            && self.gaps.is_none()
            && self.timeline.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::gaps::{GapKind, Priority};
    use crate::view::gap_filter::{PriorityFilter, TypeFilter};

    const PARTIAL: &str = r#"{
        "session_id": "0f8fad5b-d9cb-469f-a165-70867728950e",
        "status": "partial",
        "match_analysis": null,
        "gap_analysis": null,
        "timeline": null,
        "overall_score": 72,
        "message": "Partial results available"
    }"#;

    const COMPLETE: &str = r#"{
        "session_id": "abc",
        "status": "completed",
        "overall_score": 88,
        "match_analysis": {
            "ats_score": {"score": 90, "explanation": "clean", "strengths": ["Clear headings"]},
            "role_match_score": {"score": 85, "explanation": "close"},
            "company_fit_score": {"score": 80, "explanation": "good"},
            "overall_score": {"score": 88, "explanation": "strong", "key_strengths": ["Shipped apps"]}
        },
        "gap_analysis": {
            "technical_gaps": [
                {"gap_id": "t1", "title": "Go", "priority": "low"},
                {"gap_id": "t2", "title": "Kubernetes", "priority": "high"}
            ],
            "resume_optimization_gaps": [{"gap_id": "r1", "title": "Metrics", "priority": "medium"}],
            "quick_wins": [{"title": "Add GitHub link"}]
        }
    }"#;

    #[test]
    fn test_partial_payload_keeps_overall_only() {
        let results: ResultsResponse = serde_json::from_str(PARTIAL).unwrap();
        let report = ResultsReport::build(&results, &GapFilter::default());

        let overall = report.overall.as_ref().unwrap();
        assert_eq!(overall.label, "Good Match");
        assert!(overall.partial);
        assert!(report.score_breakdown.is_none());
        assert!(report.strengths.is_none());
        assert!(report.gaps.is_none());
        assert!(report.timeline.is_none());
        assert_eq!(report.short_session, "0f8fad5b...");
    }

    #[test]
    fn test_complete_payload_sections() {
        let results: ResultsResponse = serde_json::from_str(COMPLETE).unwrap();
        let report = ResultsReport::build(&results, &GapFilter::default());

        assert_eq!(report.overall.as_ref().map(|o| o.label), Some("Excellent Match!"));
        assert_eq!(report.score_breakdown.as_ref().map(Vec::len), Some(3));
        let strengths = report.strengths.as_ref().unwrap();
        assert_eq!(strengths.groups[0].heading, "ATS Optimization");
        assert_eq!(strengths.key_highlights, vec!["Shipped apps".to_string()]);

        let gaps = report.gaps.as_ref().unwrap();
        assert_eq!(gaps.total_gaps, 3);
        let order: Vec<&str> = gaps.gaps.iter().map(Gap::gap_id).collect();
        assert_eq!(order, vec!["t2", "r1", "t1"]);
        assert!(!gaps.filter.active);
    }

    #[test]
    fn test_filter_without_matches_keeps_section() {
        let results: ResultsResponse = serde_json::from_str(COMPLETE).unwrap();
        let filter = GapFilter::new(
            TypeFilter::Only(GapKind::CompanyFit),
            PriorityFilter::Only(Priority::High),
        );
        let report = ResultsReport::build(&results, &filter);
        let gaps = report.gaps.as_ref().unwrap();
        assert!(!gaps.has_matches());
        assert!(gaps.filter.active);
        assert_eq!(gaps.filter.gap_type, "Company Fit");
    }

    #[test]
    fn test_missing_overall_score_drops_card() {
        let results: ResultsResponse =
            serde_json::from_str(r#"{"session_id": "s", "status": "failed"}"#).unwrap();
        let report = ResultsReport::build(&results, &GapFilter::default());
        assert!(report.is_empty());
    }
}
