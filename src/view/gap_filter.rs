//! Type/priority filtering and ordering of gaps

use crate::models::gaps::{Gap, GapAnalysis, GapKind, Priority};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Only(GapKind),
}

impl TypeFilter {
    pub fn matches(&self, gap: &Gap) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(kind) => gap.kind() == *kind,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TypeFilter::All => "All Types",
            TypeFilter::Only(kind) => kind.label(),
        }
    }

    /// Choices in menu order.
    pub fn options() -> [TypeFilter; 5] {
        [
            TypeFilter::All,
            TypeFilter::Only(GapKind::Technical),
            TypeFilter::Only(GapKind::Experience),
            TypeFilter::Only(GapKind::CompanyFit),
            TypeFilter::Only(GapKind::Resume),
        ]
    }
}

impl FromStr for TypeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "all" => Ok(TypeFilter::All),
            "technical" => Ok(TypeFilter::Only(GapKind::Technical)),
            "experience" => Ok(TypeFilter::Only(GapKind::Experience)),
            "company_fit" | "companyfit" => Ok(TypeFilter::Only(GapKind::CompanyFit)),
            "resume" => Ok(TypeFilter::Only(GapKind::Resume)),
            _ => Err(format!(
                "Invalid gap type: {}. Supported: {}",
                s,
                supported(&TypeFilter::options())
            )),
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeFilter::All => f.write_str("all"),
            TypeFilter::Only(kind) => write!(f, "{}", kind),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriorityFilter {
    #[default]
    All,
    Only(Priority),
}

impl PriorityFilter {
    pub fn matches(&self, gap: &Gap) -> bool {
        match self {
            PriorityFilter::All => true,
            PriorityFilter::Only(priority) => gap.priority() == *priority,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PriorityFilter::All => "All Priorities",
            PriorityFilter::Only(Priority::High) => "High",
            PriorityFilter::Only(Priority::Medium) => "Medium",
            PriorityFilter::Only(Priority::Low) => "Low",
        }
    }

    pub fn options() -> [PriorityFilter; 4] {
        [
            PriorityFilter::All,
            PriorityFilter::Only(Priority::High),
            PriorityFilter::Only(Priority::Medium),
            PriorityFilter::Only(Priority::Low),
        ]
    }
}

impl FromStr for PriorityFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(PriorityFilter::All),
            "high" => Ok(PriorityFilter::Only(Priority::High)),
            "medium" => Ok(PriorityFilter::Only(Priority::Medium)),
            "low" => Ok(PriorityFilter::Only(Priority::Low)),
            _ => Err(format!(
                "Invalid priority: {}. Supported: {}",
                s,
                supported(&PriorityFilter::options())
            )),
        }
    }
}

impl fmt::Display for PriorityFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriorityFilter::All => f.write_str("all"),
            PriorityFilter::Only(priority) => write!(f, "{}", priority),
        }
    }
}

fn supported<T: fmt::Display>(options: &[T]) -> String {
    options.iter().map(T::to_string).collect::<Vec<_>>().join(", ")
}

/// The two independent filter selections of the gaps section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GapFilter {
    pub kind: TypeFilter,
    pub priority: PriorityFilter,
}

impl GapFilter {
    pub fn new(kind: TypeFilter, priority: PriorityFilter) -> Self {
        Self { kind, priority }
    }

    pub fn is_active(&self) -> bool {
        self.kind != TypeFilter::All || self.priority != PriorityFilter::All
    }

    /// Reset both dimensions in one step.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Filter by type, then by priority, then order by priority rank. The
    /// sort is stable so equal-priority gaps keep their incoming order.
    pub fn apply<'a>(&self, gaps: &'a [Gap]) -> Vec<&'a Gap> {
        let mut selected: Vec<&Gap> = gaps
            .iter()
            .filter(|g| self.kind.matches(g))
            .filter(|g| self.priority.matches(g))
            .collect();
        selected.sort_by_key(|g| g.priority().rank());
        selected
    }
}

/// What the gaps section should show.
#[derive(Debug, Clone, PartialEq)]
pub enum GapsView<'a> {
    /// No gaps at all; the section is omitted.
    Hidden,
    /// Gaps exist but the filters exclude every one of them.
    NoMatches,
    Gaps(Vec<&'a Gap>),
}

impl<'a> GapsView<'a> {
    pub fn build(analysis: Option<&'a GapAnalysis>, filter: &GapFilter) -> Self {
        let analysis = match analysis {
            Some(a) if !a.is_empty() => a,
            _ => return GapsView::Hidden,
        };

        let gaps = filter.apply(&analysis.gaps);
        if gaps.is_empty() {
            GapsView::NoMatches
        } else {
            GapsView::Gaps(gaps)
        }
    }

    pub fn is_hidden(&self) -> bool {
        matches!(self, GapsView::Hidden)
    }

    pub fn gaps(&self) -> &[&'a Gap] {
        match self {
            GapsView::Gaps(gaps) => gaps,
            _ => &[],
        }
    }
}

pub const NO_MATCHES_MESSAGE: &str = "No gaps match your filters. Try adjusting your selection.";
