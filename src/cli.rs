//! CLI interface for the ready2intern client

use crate::config::OutputFormat;
use crate::view::gap_filter::{GapFilter, PriorityFilter, TypeFilter};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ready2intern")]
#[command(about = "Résumé fit reports for internship applications")]
#[command(long_about = "Upload a résumé, pick a target company, describe the role and get a fit report with scores, gaps and a preparation timeline from the Ready2Intern backend")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL (overrides config and READY2INTERN_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check that the backend is reachable
    Health,

    /// List the companies you can target
    Companies,

    /// Upload a résumé (PDF or DOCX, max 5MB); only the first file is used
    Upload {
        #[arg(required = true, num_args = 1..)]
        files: Vec<PathBuf>,
    },

    /// Start an analysis for an uploaded résumé
    Analyze {
        /// Session id returned by `upload`
        #[arg(short, long)]
        session: String,

        /// Company id, e.g. "stripe"
        #[arg(long)]
        company: String,

        #[command(flatten)]
        role: RoleArgs,
    },

    /// Fetch and render the fit report for a session
    Results {
        /// Session id
        session: Option<String>,

        #[command(flatten)]
        report: ReportArgs,
    },

    /// Dispatch a client route, e.g. "/results?session=abc"
    Open {
        route: String,

        #[command(flatten)]
        report: ReportArgs,
    },

    /// Upload, analyze and show results in one go
    Run {
        /// Résumé file(s); only the first is used
        #[arg(short, long, required = true, num_args = 1..)]
        resume: Vec<PathBuf>,

        /// Company id, e.g. "stripe"
        #[arg(long)]
        company: String,

        #[command(flatten)]
        role: RoleArgs,

        #[command(flatten)]
        report: ReportArgs,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct RoleArgs {
    /// Role description text (50-10000 characters)
    #[arg(long, conflicts_with = "role_file", required_unless_present = "role_file")]
    pub role: Option<String>,

    /// Read the role description from a file
    #[arg(long)]
    pub role_file: Option<PathBuf>,
}

impl RoleArgs {
    pub fn read(&self) -> std::io::Result<String> {
        match (&self.role, &self.role_file) {
            (Some(text), _) => Ok(text.clone()),
            (None, Some(path)) => std::fs::read_to_string(path),
            (None, None) => Ok(String::new()),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// Gap type filter: all, technical, experience, company_fit, resume
    #[arg(long = "type", default_value = "all", value_parser = parse_type_filter)]
    pub gap_type: TypeFilter,

    /// Gap priority filter: all, high, medium, low
    #[arg(long, default_value = "all", value_parser = parse_priority_filter)]
    pub priority: PriorityFilter,

    /// Output format: console, json, markdown, html
    #[arg(short, long)]
    pub output: Option<String>,

    /// Save output to file (or directory)
    #[arg(short, long)]
    pub save: Option<PathBuf>,

    /// Include recommendations, tasks and weekly breakdown
    #[arg(short, long)]
    pub detailed: bool,

    /// Keep polling while results are partial
    #[arg(short, long)]
    pub wait: bool,
}

impl ReportArgs {
    pub fn filter(&self) -> GapFilter {
        GapFilter::new(self.gap_type, self.priority)
    }
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        "html" => Ok(OutputFormat::Html),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown, html",
            format
        )),
    }
}

pub fn parse_type_filter(value: &str) -> Result<TypeFilter, String> {
    value.parse()
}

pub fn parse_priority_filter(value: &str) -> Result<PriorityFilter, String> {
    value.parse()
}
