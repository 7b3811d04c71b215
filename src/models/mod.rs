//! Typed backend payloads

pub mod company;
pub mod gaps;
pub mod results;
pub mod timeline;

pub use company::{CompaniesResponse, Company, CompanySelection};
pub use gaps::{Gap, GapAnalysis, GapKind, Priority};
pub use results::{MatchAnalysis, ResultsResponse, ResultsStatus, ScoreDetail};
pub use timeline::TimelineResult;
