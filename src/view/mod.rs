//! Presentation model: everything the report and dashboard decide before
//! anything is rendered.

pub mod dashboard;
pub mod gap_filter;
pub mod results_page;
pub mod route;
pub mod score;
pub mod sections;

pub use dashboard::DashboardForm;
pub use gap_filter::{GapFilter, GapsView, PriorityFilter, TypeFilter};
pub use results_page::{ResultsPage, ResultsState};
pub use route::Route;
pub use score::ScoreBand;
