//! Overall score banding

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Excellent,
    Good,
    Moderate,
    NeedsImprovement,
    Significant,
}

impl ScoreBand {
    pub fn from_score(score: u32) -> Self {
        match score {
            85.. => ScoreBand::Excellent,
            70..=84 => ScoreBand::Good,
            55..=69 => ScoreBand::Moderate,
            40..=54 => ScoreBand::NeedsImprovement,
            _ => ScoreBand::Significant,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "Excellent Match!",
            ScoreBand::Good => "Good Match",
            ScoreBand::Moderate => "Moderate Match",
            ScoreBand::NeedsImprovement => "Needs Improvement",
            ScoreBand::Significant => "Significant Gaps",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => {
                "Your profile is highly competitive for this role. Focus on final polish and interview prep."
            }
            ScoreBand::Good => {
                "You have a solid foundation. Address key gaps to strengthen your application."
            }
            ScoreBand::Moderate => {
                "You meet some requirements. Follow the development timeline to improve your match."
            }
            ScoreBand::NeedsImprovement => {
                "Several areas need work. Focus on high-priority gaps first."
            }
            ScoreBand::Significant => {
                "Significant preparation needed. Start with foundational skills and experience."
            }
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "🌟",
            ScoreBand::Good => "✅",
            ScoreBand::Moderate => "📈",
            ScoreBand::NeedsImprovement => "🔧",
            ScoreBand::Significant => "🚧",
        }
    }

    /// CSS class used by the HTML report.
    pub fn css_class(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "score-excellent",
            ScoreBand::Good => "score-good",
            ScoreBand::Moderate => "score-fair",
            ScoreBand::NeedsImprovement | ScoreBand::Significant => "score-poor",
        }
    }
}

pub const PARTIAL_RESULTS_BADGE: &str = "⚠️ Partial results - some analysis still in progress";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(ScoreBand::from_score(100).label(), "Excellent Match!");
        assert_eq!(ScoreBand::from_score(85).label(), "Excellent Match!");
        assert_eq!(ScoreBand::from_score(84).label(), "Good Match");
        assert_eq!(ScoreBand::from_score(70).label(), "Good Match");
        assert_eq!(ScoreBand::from_score(55).label(), "Moderate Match");
        assert_eq!(ScoreBand::from_score(40).label(), "Needs Improvement");
        assert_eq!(ScoreBand::from_score(39).label(), "Significant Gaps");
        assert_eq!(ScoreBand::from_score(0), ScoreBand::Significant);
    }

    #[test]
    fn test_descriptions() {
        assert!(ScoreBand::from_score(60).description().contains("development timeline"));
        assert!(ScoreBand::from_score(45).description().contains("high-priority gaps"));
    }
}
