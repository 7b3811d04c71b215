//! Target companies offered by the backend

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub display_name: String,
    /// Hex colour used as the company's accent, e.g. `#FF9900`.
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub logo_url: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompaniesResponse {
    pub companies: Vec<Company>,
}

/// Single-choice selection over the fetched company list.
#[derive(Debug, Clone, Default)]
pub struct CompanySelection {
    companies: Vec<Company>,
    selected: Option<String>,
}

impl CompanySelection {
    pub fn new(companies: Vec<Company>) -> Self {
        Self {
            companies,
            selected: None,
        }
    }

    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    /// Select by id (case-insensitive). Unknown ids leave the current
    /// selection untouched and return `false`.
    pub fn select(&mut self, id: &str) -> bool {
        match self.companies.iter().find(|c| c.id.eq_ignore_ascii_case(id)) {
            Some(company) => {
                self.selected = Some(company.id.clone());
                true
            }
            None => false,
        }
    }

    pub fn selected(&self) -> Option<&Company> {
        let id = self.selected.as_deref()?;
        self.companies.iter().find(|c| c.id == id)
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.as_deref() == Some(id)
    }
}
