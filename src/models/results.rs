//! Results envelope returned for a session

use crate::models::gaps::GapAnalysis;
use crate::models::timeline::TimelineResult;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreDetail {
    pub score: u32,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
}

impl ScoreDetail {
    /// Score clamped into 0..=100 for bars and badges.
    pub fn percent(&self) -> u8 {
        self.score.min(100) as u8
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallScoreDetail {
    #[serde(flatten)]
    pub detail: ScoreDetail,
    #[serde(default)]
    pub key_strengths: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchAnalysis {
    pub ats_score: ScoreDetail,
    pub role_match_score: ScoreDetail,
    pub company_fit_score: ScoreDetail,
    pub overall_score: OverallScoreDetail,
}

impl MatchAnalysis {
    /// The three category cards, in display order.
    pub fn categories(&self) -> [ScoreCategory<'_>; 3] {
        [
            ScoreCategory {
                title: "ATS Score",
                strengths_heading: "ATS Optimization",
                icon: "🤖",
                detail: &self.ats_score,
            },
            ScoreCategory {
                title: "Role Match",
                strengths_heading: "Role Alignment",
                icon: "🎯",
                detail: &self.role_match_score,
            },
            ScoreCategory {
                title: "Company Fit",
                strengths_heading: "Company Fit",
                icon: "🏢",
                detail: &self.company_fit_score,
            },
        ]
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ScoreCategory<'a> {
    pub title: &'static str,
    pub strengths_heading: &'static str,
    pub icon: &'static str,
    pub detail: &'a ScoreDetail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultsStatus {
    Completed,
    Partial,
    Failed,
}

impl fmt::Display for ResultsStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ResultsStatus::Completed => "completed",
            ResultsStatus::Partial => "partial",
            ResultsStatus::Failed => "failed",
        })
    }
}

/// Top-level results payload. Every subsection may be absent; absence
/// removes the matching section from the report and is never an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultsResponse {
    pub session_id: String,
    pub status: ResultsStatus,
    #[serde(default)]
    pub resume_analysis: Option<serde_json::Value>,
    #[serde(default)]
    pub match_analysis: Option<MatchAnalysis>,
    #[serde(default)]
    pub gap_analysis: Option<GapAnalysis>,
    #[serde(default)]
    pub timeline: Option<TimelineResult>,
    #[serde(default)]
    pub overall_score: Option<u32>,
    #[serde(default)]
    pub message: String,
}

impl ResultsResponse {
    pub fn is_partial(&self) -> bool {
        self.status == ResultsStatus::Partial
    }

    /// First characters of the session id, as shown in the report header.
    pub fn short_session(&self) -> String {
        let short: String = self.session_id.chars().take(8).collect();
        if short.len() < self.session_id.len() {
            format!("{}...", short)
        } else {
            short
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_sections_decode_to_none() {
        let json = r#"{
            "session_id": "0f8fad5b-d9cb-469f-a165-70867728950e",
            "status": "partial",
            "resume_analysis": {"name": "A"},
            "match_analysis": null,
            "gap_analysis": null,
            "timeline": null,
            "overall_score": 72,
            "message": "Partial results available. Missing: gap_analysis"
        }"#;
        let results: ResultsResponse = serde_json::from_str(json).unwrap();
        assert!(results.is_partial());
        assert!(results.match_analysis.is_none());
        assert!(results.gap_analysis.is_none());
        assert_eq!(results.overall_score, Some(72));
        assert_eq!(results.short_session(), "0f8fad5b...");
    }

    #[test]
    fn test_missing_sections_decode_to_none() {
        let results: ResultsResponse =
            serde_json::from_str(r#"{"session_id": "abc", "status": "failed"}"#).unwrap();
        assert_eq!(results.status, ResultsStatus::Failed);
        assert!(results.timeline.is_none());
        assert_eq!(results.short_session(), "abc");
    }

    #[test]
    fn test_overall_score_flattens_key_strengths() {
        let json = r#"{
            "ats_score": {"score": 80, "explanation": "ok"},
            "role_match_score": {"score": 70, "explanation": "ok", "strengths": ["Python"]},
            "company_fit_score": {"score": 130, "explanation": "ok"},
            "overall_score": {"score": 75, "explanation": "fine", "key_strengths": ["Projects"]}
        }"#;
        let analysis: MatchAnalysis = serde_json::from_str(json).unwrap();
        assert_eq!(analysis.overall_score.detail.score, 75);
        assert_eq!(analysis.overall_score.key_strengths, vec!["Projects".to_string()]);
        assert_eq!(analysis.company_fit_score.percent(), 100);
        let titles: Vec<&str> = analysis.categories().iter().map(|c| c.title).collect();
        assert_eq!(titles, vec!["ATS Score", "Role Match", "Company Fit"]);
    }
}
