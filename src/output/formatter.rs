//! Output formatters for the fit report

use crate::config::OutputFormat;
use crate::error::{AppError, Result};
use crate::models::gaps::{Gap, Priority};
use crate::output::report::*;
use crate::view::gap_filter::NO_MATCHES_MESSAGE;
use crate::view::score::PARTIAL_RESULTS_BADGE;
use crate::view::sections::{phase_summary, FLEXIBILITY_HEADING, MOTIVATION_HEADING};
use askama::Template;
use colored::{Color, Colorize};
use std::path::{Path, PathBuf};

/// Trait for formatting fit reports
pub trait OutputFormatter {
    fn format_report(&self, report: &ResultsReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Terminal output with colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

pub struct HtmlFormatter {
    include_styles: bool,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Ready2Intern Fit Report</title>
    {% if include_styles %}
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 960px;
            margin: 0 auto;
            padding: 20px;
            background: #f5f3ff;
        }
        .container {
            background: white;
            padding: 30px;
            border-radius: 12px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
        }
        .header {
            border-bottom: 3px solid #7c3aed;
            padding-bottom: 16px;
            margin-bottom: 24px;
        }
        .score-badge {
            display: inline-block;
            padding: 6px 14px;
            border-radius: 20px;
            font-weight: bold;
            color: white;
            margin-left: 10px;
        }
        .score-excellent { background: #16a34a; }
        .score-good { background: #2563eb; }
        .score-fair { background: #eab308; color: #000; }
        .score-poor { background: #dc2626; }
        .partial {
            background: #fef3c7;
            border-left: 4px solid #f59e0b;
            padding: 10px 14px;
            border-radius: 6px;
        }
        .section { margin: 28px 0; }
        .section h2 {
            color: #6d28d9;
            border-bottom: 2px solid #ede9fe;
            padding-bottom: 8px;
        }
        .grid {
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(220px, 1fr));
            gap: 16px;
        }
        .card {
            background: #faf5ff;
            padding: 16px;
            border-radius: 8px;
            border-left: 4px solid #7c3aed;
        }
        .gap { background: #f9fafb; padding: 14px; margin: 10px 0; border-radius: 8px; border-left: 4px solid #9ca3af; }
        .priority-high { border-left-color: #dc2626; }
        .priority-medium { border-left-color: #f59e0b; }
        .priority-low { border-left-color: #16a34a; }
        .muted { color: #6b7280; font-size: 0.9em; }
        .metadata {
            background: #f3f4f6;
            padding: 12px;
            border-radius: 6px;
            margin-top: 30px;
            font-size: 0.9em;
            color: #6b7280;
        }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>🎯 Your Analysis Results</h1>
            <p>Session: {{ short_session }} | Status: {{ status }}</p>
            {% if has_message %}<p class="muted">{{ message }}</p>{% endif %}
        </div>

        {% if let Some(card) = overall %}
        <div class="section">
            <h2>Overall Match Score</h2>
            <h3>{{ card.score }}/100 <span class="score-badge {{ card.band.css_class() }}">{{ card.label }}</span></h3>
            <p>{{ card.description }}</p>
            {% if card.partial %}<p class="partial">{{ partial_badge }}</p>{% endif %}
        </div>
        {% endif %}

        {% if let Some(categories) = breakdown %}
        <div class="section">
            <h2>Score Breakdown</h2>
            <div class="grid">
            {% for c in categories %}
                <div class="card">
                    <h4>{{ c.icon }} {{ c.title }}</h4>
                    <p><strong>{{ c.detail.score }}/100</strong></p>
                    <p>{{ c.detail.explanation }}</p>
                </div>
            {% endfor %}
            </div>
        </div>
        {% endif %}

        {% if let Some(strengths) = strengths %}
        <div class="section">
            <h2>✅ Your Strengths</h2>
            <div class="grid">
            {% for group in strengths.groups %}
                <div class="card">
                    <h4>{{ group.icon }} {{ group.heading }}</h4>
                    <ul>{% for item in group.items %}<li>{{ item }}</li>{% endfor %}</ul>
                </div>
            {% endfor %}
            {% if !strengths.key_highlights.is_empty() %}
                <div class="card">
                    <h4>⭐ Key Highlights</h4>
                    <ul>{% for item in strengths.key_highlights %}<li>{{ item }}</li>{% endfor %}</ul>
                </div>
            {% endif %}
            </div>
        </div>
        {% endif %}

        {% if let Some(gaps) = gaps %}
        <div class="section">
            <h2>🎯 Gap Analysis</h2>
            <p>{{ gaps.section.summary.total_gaps }} gaps identified • {{ gaps.section.summary.high_priority_count }} high • {{ gaps.section.summary.medium_priority_count }} medium • {{ gaps.section.summary.low_priority_count }} low</p>
            {% if !gaps.section.summary.estimated_preparation_time.is_empty() %}
            <p><strong>Estimated preparation:</strong> {{ gaps.section.summary.estimated_preparation_time }}</p>
            {% endif %}
            {% if !gaps.section.summary.overall_assessment.is_empty() %}
            <p><strong>Overall Assessment:</strong> {{ gaps.section.summary.overall_assessment }}</p>
            {% endif %}
            {% if !gaps.section.quick_wins.is_empty() %}
            <h3>⚡ Quick Wins (Start Here!)</h3>
            <ol>{% for win in gaps.section.quick_wins %}<li><strong>{{ win.title }}</strong> {{ win.description }}</li>{% endfor %}</ol>
            {% endif %}
            <h3>Detailed Gaps ({{ gaps.cards.len() }})</h3>
            {% if gaps.section.filter.active %}
            <p class="muted">Filtered by {{ gaps.section.filter.gap_type }} / {{ gaps.section.filter.priority }}</p>
            {% endif %}
            {% if gaps.cards.is_empty() %}<p>{{ no_matches }}</p>{% endif %}
            {% for gap in gaps.cards %}
            <div class="gap priority-{{ gap.priority }}">
                <h4>{{ gap.icon }} {{ gap.title }} <span class="muted">{{ gap.kind }} • {{ gap.priority_label }}</span></h4>
                <p>{{ gap.description }}</p>
                <ul>{% for line in gap.details %}<li>{{ line }}</li>{% endfor %}</ul>
            </div>
            {% endfor %}
        </div>
        {% endif %}

        {% if let Some(timeline) = timeline %}
        <div class="section">
            <h2>📅 Preparation Timeline</h2>
            <div class="grid">
                <div class="card"><strong>{{ timeline.section.plan.metadata.total_weeks }}</strong> Total Weeks</div>
                <div class="card"><strong>{{ timeline.section.plan.metadata.hours_per_week }}</strong> Hours/Week</div>
                <div class="card"><strong>{{ timeline.section.plan.metadata.total_hours }}</strong> Total Hours</div>
                <div class="card"><strong>{{ timeline.intensity }}</strong> Intensity Level</div>
            </div>
            {% if !timeline.section.plan.metadata.feasibility_assessment.is_empty() %}
            <h3>💡 Feasibility Assessment</h3>
            <p>{{ timeline.section.plan.metadata.feasibility_assessment }}</p>
            {% endif %}
            {% for phase in timeline.phases %}
            <h3>Phase {{ phase.number }}: {{ phase.title }}</h3>
            <p class="muted">{{ phase.summary }}</p>
            <ul>{% for task in phase.tasks %}<li>{{ task }}</li>{% endfor %}</ul>
            {% endfor %}
            {% if !timeline.section.critical_path_titles.is_empty() %}
            <h3>🚨 Critical Path (Must Complete)</h3>
            <ul>{% for title in timeline.section.critical_path_titles %}<li>{{ title }}</li>{% endfor %}</ul>
            {% endif %}
            {% for notes in timeline.notes %}
            {% if !notes.items.is_empty() %}
            <h3>{{ notes.heading }}</h3>
            <ul>{% for item in notes.items %}<li>{{ item }}</li>{% endfor %}</ul>
            {% endif %}
            {% endfor %}
        </div>
        {% endif %}

        {% if empty %}
        <div class="section"><p>No analysis sections are available for this session yet.</p></div>
        {% endif %}

        <div class="metadata">
            <p>Generated {{ generated_at }} by ready2intern v{{ version }}</p>
        </div>
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate<'a> {
    include_styles: bool,
    short_session: &'a str,
    status: String,
    has_message: bool,
    message: &'a str,
    overall: Option<&'a OverallCard>,
    partial_badge: &'static str,
    breakdown: Option<&'a Vec<CategoryScore>>,
    strengths: Option<&'a StrengthsSummary>,
    gaps: Option<HtmlGaps<'a>>,
    no_matches: &'static str,
    timeline: Option<HtmlTimeline<'a>>,
    empty: bool,
    generated_at: String,
    version: &'a str,
}

struct HtmlGaps<'a> {
    section: &'a GapsSection,
    cards: Vec<HtmlGap<'a>>,
}

struct HtmlGap<'a> {
    priority: Priority,
    priority_label: &'static str,
    icon: &'static str,
    kind: &'static str,
    title: &'a str,
    description: &'a str,
    details: Vec<String>,
}

struct HtmlTimeline<'a> {
    section: &'a TimelineSection,
    intensity: &'static str,
    phases: Vec<HtmlPhase<'a>>,
    notes: [HtmlNotes<'a>; 2],
}

struct HtmlPhase<'a> {
    number: u32,
    title: &'a str,
    summary: String,
    tasks: Vec<String>,
}

struct HtmlNotes<'a> {
    heading: &'static str,
    items: &'a [String],
}

fn priority_tag(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "HIGH",
        Priority::Medium => "MEDIUM",
        Priority::Low => "LOW",
    }
}

fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::High => Color::Red,
        Priority::Medium => Color::Yellow,
        Priority::Low => Color::Green,
    }
}

/// Kind-specific lines shown under a gap in detailed output.
fn gap_detail_lines(gap: &Gap) -> Vec<String> {
    let mut lines = Vec::new();
    let common = gap.common();
    if !common.impact_on_application.is_empty() {
        lines.push(format!("Impact: {}", common.impact_on_application));
    }
    if !common.priority_reasoning.is_empty() {
        lines.push(format!("Why this priority: {}", common.priority_reasoning));
    }

    match gap {
        Gap::Technical(g) => {
            if !g.current_level.is_empty() || !g.target_level.is_empty() {
                lines.push(format!("Level: {} → {}", g.current_level, g.target_level));
            }
            for rec in &g.recommendations {
                lines.push(with_time(&format!("→ {}", rec.action), &rec.estimated_time));
                for resource in &rec.resources {
                    let link = resource.link().map(|l| format!(" <{}>", l)).unwrap_or_default();
                    lines.push(format!("    📚 {}{}", resource.name, link));
                }
            }
        }
        Gap::Experience(g) => {
            for rec in &g.recommendations {
                lines.push(with_time(&format!("→ {}", rec.action), &rec.estimated_time));
                for idea in &rec.project_ideas {
                    let tech = if idea.technologies.is_empty() {
                        String::new()
                    } else {
                        format!(" [{}]", idea.technologies.join(", "))
                    };
                    lines.push(format!("    💡 {}{}", idea.name, tech));
                }
            }
        }
        Gap::CompanyFit(g) => {
            if !g.company_value.is_empty() {
                lines.push(format!("Company value: {}", g.company_value));
            }
            for rec in &g.recommendations {
                if let Some(action) = &rec.action {
                    lines.push(with_time(
                        &format!("→ {}", action),
                        rec.estimated_time.as_deref().unwrap_or_default(),
                    ));
                }
            }
        }
        Gap::Resume(g) => {
            for rec in &g.recommendations {
                lines.push(with_time(&format!("→ {}", rec.action), &rec.estimated_time));
                if let Some(before) = &rec.before_example {
                    lines.push(format!("    Before: {}", before));
                }
                if let Some(after) = &rec.after_example {
                    lines.push(format!("    After:  {}", after));
                }
            }
        }
    }
    lines
}

fn with_time(text: &str, time: &str) -> String {
    if time.is_empty() {
        text.to_string()
    } else {
        format!("{} ({})", text, time)
    }
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            3 => "▒",
            _ => "░",
        };

        let color = match level {
            1 => Color::Magenta,
            2 => Color::Blue,
            3 => Color::Cyan,
            _ => Color::White,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, card: &OverallCard) -> String {
        let color = match card.score {
            85.. => Color::Green,
            70..=84 => Color::BrightGreen,
            55..=69 => Color::Yellow,
            40..=54 => Color::BrightRed,
            _ => Color::Red,
        };

        if self.use_colors {
            format!("[{}]", card.label.color(color).bold())
        } else {
            format!("[{}]", card.label)
        }
    }

    fn format_bar(&self, percent: u8) -> String {
        let filled = (percent as usize + 5) / 10;
        format!("{}{}", "█".repeat(filled), "░".repeat(10 - filled))
    }

    fn format_gaps(&self, section: &GapsSection, output: &mut String) {
        output.push_str(&self.format_header("🎯 Gap Analysis", 2));
        let summary = &section.summary;
        output.push_str(&format!(
            "{} gaps identified • Estimated preparation: {}\n",
            summary.total_gaps,
            if summary.estimated_preparation_time.is_empty() {
                "n/a"
            } else {
                summary.estimated_preparation_time.as_str()
            }
        ));
        output.push_str(&format!(
            "{} high • {} medium • {} low\n",
            self.colorize(&summary.high_priority_count.to_string(), Color::Red),
            self.colorize(&summary.medium_priority_count.to_string(), Color::Yellow),
            self.colorize(&summary.low_priority_count.to_string(), Color::Green),
        ));
        if !summary.overall_assessment.is_empty() {
            output.push_str(&format!(
                "{} {}\n",
                self.colorize("Overall Assessment:", Color::Cyan),
                summary.overall_assessment
            ));
        }

        if !section.quick_wins.is_empty() {
            output.push_str(&self.format_header("⚡ Quick Wins (Start Here!)", 3));
            for (i, win) in section.quick_wins.iter().enumerate() {
                output.push_str(&format!("{}. {}\n", i + 1, with_time(&win.title, &win.estimated_time)));
                if !win.description.is_empty() {
                    output.push_str(&format!("   {}\n", win.description));
                }
                if self.detailed {
                    for step in &win.steps {
                        output.push_str(&format!("   - {}\n", step));
                    }
                }
            }
        }

        output.push_str(&self.format_header(&format!("Detailed Gaps ({})", section.gaps.len()), 3));
        if section.filter.active {
            output.push_str(&self.colorize(
                &format!(
                    "Filters: {} / {} (pass --type all --priority all to clear)\n",
                    section.filter.gap_type, section.filter.priority
                ),
                Color::BrightBlack,
            ));
        }
        if !section.has_matches() {
            output.push_str(&format!("{}\n", NO_MATCHES_MESSAGE));
            return;
        }

        for gap in &section.gaps {
            let common = gap.common();
            let kind = gap.kind();
            output.push_str(&format!(
                "{} {} {} {}\n",
                self.colorize(&format!("[{}]", priority_tag(gap.priority())), priority_color(gap.priority())),
                kind.icon(),
                self.colorize(&common.title, Color::White),
                self.colorize(&format!("({})", kind.label()), Color::BrightBlack)
            ));
            if !common.description.is_empty() {
                output.push_str(&format!("   {}\n", common.description));
            }
            if self.detailed {
                for line in gap_detail_lines(gap) {
                    output.push_str(&format!("   {}\n", line));
                }
            }
        }

        if self.detailed {
            if let Some(plan) = &section.action_plan {
                output.push_str(&self.format_header("🗺️ Prioritized Action Plan", 3));
                for (name, phase) in plan.phases() {
                    output.push_str(&format!("{} ({}): {}\n", name, phase.timeframe, phase.focus));
                    for action in &phase.actions {
                        output.push_str(&format!("  • {}\n", with_time(&action.action, &action.estimated_time)));
                    }
                }
            }
            if !section.long_term_development.is_empty() {
                output.push_str(&self.format_header("🌱 Long-term Development", 3));
                for item in &section.long_term_development {
                    output.push_str(&format!("• {}\n", with_time(&item.title, &item.estimated_time)));
                    for milestone in &item.milestones {
                        output.push_str(&format!("  - {}\n", milestone.milestone));
                    }
                }
            }
        }
    }

    fn format_timeline(&self, section: &TimelineSection, output: &mut String) {
        let plan = &section.plan;
        let meta = &plan.metadata;
        output.push_str(&self.format_header("📅 Preparation Timeline", 2));
        output.push_str(&format!(
            "{} weeks • {} hrs/week • {} total hours • {}\n",
            meta.total_weeks,
            meta.hours_per_week,
            meta.total_hours,
            self.colorize(meta.intensity_level.as_upper(), Color::Cyan)
        ));
        if !meta.feasibility_assessment.is_empty() {
            output.push_str(&format!("💡 Feasibility: {}\n", meta.feasibility_assessment));
        }

        for phase in &plan.phases {
            output.push_str(&format!(
                "\nPhase {}: {}\n",
                phase.phase_number,
                self.colorize(&phase.title, Color::White)
            ));
            output.push_str(&format!("   {}\n", phase_summary(phase)));
            if self.detailed {
                for task in &phase.tasks {
                    output.push_str(&format!(
                        "   {} {} ({}h)\n",
                        self.colorize(&format!("[{}]", priority_tag(task.priority)), priority_color(task.priority)),
                        task.title,
                        task.estimated_hours
                    ));
                }
                for milestone in &phase.milestones {
                    output.push_str(&format!("   🏁 {}\n", milestone.title));
                }
            }
        }

        if self.detailed && !plan.weekly_breakdown.is_empty() {
            output.push_str(&self.format_header("Weekly Breakdown", 3));
            for week in &plan.weekly_breakdown {
                output.push_str(&format!(
                    "Week {}: {} ({} hrs)\n",
                    week.week_number, week.focus, week.estimated_hours
                ));
                if !week.key_deliverable.is_empty() {
                    output.push_str(&format!("   Deliverable: {}\n", week.key_deliverable));
                }
            }
        }

        if !section.critical_path_titles.is_empty() {
            output.push_str(&self.format_header("🚨 Critical Path (Must Complete)", 3));
            output.push_str(&format!("{}\n", section.critical_path_titles.join(" → ")));
        }
        if !plan.flexibility_notes.is_empty() {
            output.push_str(&self.format_header(FLEXIBILITY_HEADING, 3));
            for note in &plan.flexibility_notes {
                output.push_str(&format!("  • {}\n", note));
            }
        }
        if !plan.motivation_tips.is_empty() {
            output.push_str(&self.format_header(MOTIVATION_HEADING, 3));
            for tip in &plan.motivation_tips {
                output.push_str(&format!("  • {}\n", tip));
            }
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &ResultsReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("🎯 YOUR ANALYSIS RESULTS", 1));
        output.push_str(&format!(
            "Session: {} | Status: {} | Generated: {}\n",
            report.short_session,
            report.status,
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        if let Some(card) = &report.overall {
            output.push_str(&self.format_header("Overall Match Score", 2));
            output.push_str(&format!(
                "{} {}/100 {}\n",
                card.band.emoji(),
                card.score,
                self.format_score_badge(card)
            ));
            output.push_str(&format!("{}\n", self.colorize(card.description, Color::Cyan)));
            if card.partial {
                output.push_str(&format!("{}\n", self.colorize(PARTIAL_RESULTS_BADGE, Color::Yellow)));
            }
        }

        if let Some(categories) = &report.score_breakdown {
            output.push_str(&self.format_header("Score Breakdown", 2));
            for category in categories {
                output.push_str(&format!(
                    "{} {:<12} {} {}/100\n",
                    category.icon,
                    category.title,
                    self.format_bar(category.detail.percent()),
                    category.detail.score
                ));
                if !category.detail.explanation.is_empty() {
                    output.push_str(&format!("   {}\n", category.detail.explanation));
                }
                if self.detailed {
                    for s in &category.detail.strengths {
                        output.push_str(&format!("   ✓ {}\n", self.colorize(s, Color::Green)));
                    }
                    for w in &category.detail.weaknesses {
                        output.push_str(&format!("   ✗ {}\n", self.colorize(w, Color::Yellow)));
                    }
                }
            }
        }

        if let Some(strengths) = &report.strengths {
            output.push_str(&self.format_header("✅ Your Strengths", 2));
            for group in &strengths.groups {
                output.push_str(&format!("{} {}\n", group.icon, group.heading));
                for item in &group.items {
                    output.push_str(&format!("  • {}\n", self.colorize(item, Color::Green)));
                }
            }
            if !strengths.key_highlights.is_empty() {
                output.push_str("⭐ Key Highlights\n");
                for item in &strengths.key_highlights {
                    output.push_str(&format!("  • {}\n", self.colorize(item, Color::Green)));
                }
            }
        }

        if let Some(gaps) = &report.gaps {
            self.format_gaps(gaps, &mut output);
        }

        if let Some(timeline) = &report.timeline {
            self.format_timeline(timeline, &mut output);
        }

        if report.is_empty() {
            output.push_str("\nNo analysis sections are available for this session yet.\n");
            if !report.message.is_empty() {
                output.push_str(&format!("{}\n", report.message));
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &ResultsReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn markdown_score_badge(score: u32) -> &'static str {
        match score {
            85.. => "🟢",
            70..=84 => "🟡",
            55..=69 => "🟠",
            _ => "🔴",
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &ResultsReport) -> Result<String> {
        let mut output = String::new();

        output.push_str("# 🎯 Your Analysis Results\n\n");
        output.push_str(&format!(
            "**Session:** `{}` | **Status:** {}\n\n",
            report.short_session, report.status
        ));
        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Client:** ready2intern v{}\n\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.client_version
            ));
        }

        if let Some(card) = &report.overall {
            output.push_str("## Overall Match Score\n\n");
            output.push_str(&format!(
                "**{}/100** {} {}\n\n{}\n\n",
                card.score,
                Self::markdown_score_badge(card.score),
                card.label,
                card.description
            ));
            if card.partial {
                output.push_str(&format!("> {}\n\n", PARTIAL_RESULTS_BADGE));
            }
        }

        if let Some(categories) = &report.score_breakdown {
            output.push_str("## Score Breakdown\n\n");
            output.push_str("| Category | Score | Explanation |\n|---|---|---|\n");
            for c in categories {
                output.push_str(&format!(
                    "| {} {} | {}/100 | {} |\n",
                    c.icon,
                    c.title,
                    c.detail.score,
                    c.detail.explanation.replace('|', "\\|")
                ));
            }
            output.push('\n');
        }

        if let Some(strengths) = &report.strengths {
            output.push_str("## ✅ Your Strengths\n\n");
            for group in &strengths.groups {
                output.push_str(&format!("### {} {}\n\n", group.icon, group.heading));
                for item in &group.items {
                    output.push_str(&format!("- {}\n", item));
                }
                output.push('\n');
            }
            if !strengths.key_highlights.is_empty() {
                output.push_str("### ⭐ Key Highlights\n\n");
                for item in &strengths.key_highlights {
                    output.push_str(&format!("- {}\n", item));
                }
                output.push('\n');
            }
        }

        if let Some(section) = &report.gaps {
            let summary = &section.summary;
            output.push_str("## 🎯 Gap Analysis\n\n");
            output.push_str(&format!(
                "{} gaps identified • {} high • {} medium • {} low\n\n",
                summary.total_gaps,
                summary.high_priority_count,
                summary.medium_priority_count,
                summary.low_priority_count
            ));
            if !summary.estimated_preparation_time.is_empty() {
                output.push_str(&format!(
                    "**Estimated preparation:** {}\n\n",
                    summary.estimated_preparation_time
                ));
            }
            if !summary.overall_assessment.is_empty() {
                output.push_str(&format!("**Overall Assessment:** {}\n\n", summary.overall_assessment));
            }

            if !section.quick_wins.is_empty() {
                output.push_str("### ⚡ Quick Wins (Start Here!)\n\n");
                for (i, win) in section.quick_wins.iter().enumerate() {
                    output.push_str(&format!("{}. **{}**", i + 1, win.title));
                    if !win.estimated_time.is_empty() {
                        output.push_str(&format!(" ({})", win.estimated_time));
                    }
                    if !win.description.is_empty() {
                        output.push_str(&format!(": {}", win.description));
                    }
                    output.push('\n');
                }
                output.push('\n');
            }

            output.push_str(&format!("### Detailed Gaps ({})\n\n", section.gaps.len()));
            if section.filter.active {
                output.push_str(&format!(
                    "_Filtered by {} / {}_\n\n",
                    section.filter.gap_type, section.filter.priority
                ));
            }
            if section.has_matches() {
                for gap in &section.gaps {
                    let common = gap.common();
                    output.push_str(&format!(
                        "#### {} {} `{}`\n\n",
                        gap.kind().icon(),
                        common.title,
                        priority_tag(gap.priority())
                    ));
                    if !common.description.is_empty() {
                        output.push_str(&format!("{}\n\n", common.description));
                    }
                    for line in gap_detail_lines(gap) {
                        output.push_str(&format!("- {}\n", line.trim_start()));
                    }
                    output.push('\n');
                }
            } else {
                output.push_str(&format!("_{}_\n\n", NO_MATCHES_MESSAGE));
            }
        }

        if let Some(section) = &report.timeline {
            let plan = &section.plan;
            let meta = &plan.metadata;
            output.push_str("## 📅 Preparation Timeline\n\n");
            output.push_str(&format!(
                "| Total Weeks | Hours/Week | Total Hours | Intensity |\n|---|---|---|---|\n| {} | {} | {} | {} |\n\n",
                meta.total_weeks,
                meta.hours_per_week,
                meta.total_hours,
                meta.intensity_level.as_upper()
            ));
            if !meta.feasibility_assessment.is_empty() {
                output.push_str(&format!("**💡 Feasibility Assessment:** {}\n\n", meta.feasibility_assessment));
            }
            for phase in &plan.phases {
                output.push_str(&format!("### Phase {}: {}\n\n", phase.phase_number, phase.title));
                output.push_str(&format!("_{}_\n\n", phase_summary(phase)));
                for task in &phase.tasks {
                    output.push_str(&format!(
                        "- [ ] {} ({}h, {})\n",
                        task.title, task.estimated_hours, task.priority
                    ));
                }
                output.push('\n');
            }
            if !section.critical_path_titles.is_empty() {
                output.push_str("### 🚨 Critical Path (Must Complete)\n\n");
                output.push_str(&format!("{}\n\n", section.critical_path_titles.join(" → ")));
            }
            for (heading, items) in [
                (FLEXIBILITY_HEADING, &plan.flexibility_notes),
                (MOTIVATION_HEADING, &plan.motivation_tips),
            ] {
                if !items.is_empty() {
                    output.push_str(&format!("### {}\n\n", heading));
                    for item in items {
                        output.push_str(&format!("- {}\n", item));
                    }
                    output.push('\n');
                }
            }
        }

        if report.is_empty() {
            output.push_str("_No analysis sections are available for this session yet._\n");
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn gap_cards(section: &GapsSection) -> Vec<HtmlGap<'_>> {
        section
            .gaps
            .iter()
            .map(|gap| {
                let common = gap.common();
                HtmlGap {
                    priority: gap.priority(),
                    priority_label: gap.priority().label(),
                    icon: gap.kind().icon(),
                    kind: gap.kind().label(),
                    title: &common.title,
                    description: &common.description,
                    details: gap_detail_lines(gap),
                }
            })
            .collect()
    }

    fn timeline_view(section: &TimelineSection) -> HtmlTimeline<'_> {
        let plan = &section.plan;
        HtmlTimeline {
            section,
            intensity: plan.metadata.intensity_level.as_upper(),
            phases: plan
                .phases
                .iter()
                .map(|phase| HtmlPhase {
                    number: phase.phase_number,
                    title: &phase.title,
                    summary: phase_summary(phase),
                    tasks: phase
                        .tasks
                        .iter()
                        .map(|t| format!("{} ({}h)", t.title, t.estimated_hours))
                        .collect(),
                })
                .collect(),
            notes: [
                HtmlNotes {
                    heading: FLEXIBILITY_HEADING,
                    items: &plan.flexibility_notes,
                },
                HtmlNotes {
                    heading: MOTIVATION_HEADING,
                    items: &plan.motivation_tips,
                },
            ],
        }
    }

    fn create_template_data<'a>(&self, report: &'a ResultsReport) -> HtmlTemplate<'a> {
        HtmlTemplate {
            include_styles: self.include_styles,
            short_session: &report.short_session,
            status: report.status.to_string(),
            has_message: !report.message.is_empty(),
            message: &report.message,
            overall: report.overall.as_ref(),
            partial_badge: PARTIAL_RESULTS_BADGE,
            breakdown: report.score_breakdown.as_ref(),
            strengths: report.strengths.as_ref(),
            gaps: report.gaps.as_ref().map(|section| HtmlGaps {
                section,
                cards: Self::gap_cards(section),
            }),
            no_matches: NO_MATCHES_MESSAGE,
            timeline: report.timeline.as_ref().map(Self::timeline_view),
            empty: report.is_empty(),
            generated_at: report
                .metadata
                .generated_at
                .format("%Y-%m-%d %H:%M:%S UTC")
                .to_string(),
            version: &report.metadata.client_version,
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &ResultsReport) -> Result<String> {
        let template_data = self.create_template_data(report);
        template_data
            .render()
            .map_err(|e| AppError::OutputFormatting(e.to_string()))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(true, false),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
            html_formatter: HtmlFormatter::new(true),
        }
    }

    pub fn with_options(
        use_colors: bool,
        detailed: bool,
        pretty_json: bool,
        include_metadata: bool,
        include_html_styles: bool,
    ) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
            html_formatter: HtmlFormatter::new(include_html_styles),
        }
    }

    pub fn generate_report(&self, report: &ResultsReport, format: &OutputFormat) -> Result<String> {
        let formatter: &dyn OutputFormatter = match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
            OutputFormat::Markdown => &self.markdown_formatter,
            OutputFormat::Html => &self.html_formatter,
        };
        debug_assert_eq!(formatter.supports_format(), *format);
        formatter.format_report(report)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

/// `ready2intern_<session8>[_<timestamp>].<ext>`
pub fn suggest_filename(format: &OutputFormat, session_id: &str, timestamp: bool) -> String {
    let session: String = session_id
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .take(8)
        .collect();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    format!("ready2intern_{}{}.{}", session, timestamp_suffix, format.extension())
}

/// Resolve where `--save` should write: a directory gets a suggested file name.
pub fn resolve_save_path(target: &Path, format: &OutputFormat, session_id: &str) -> PathBuf {
    if target.is_dir() {
        target.join(suggest_filename(format, session_id, true))
    } else {
        target.to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::gaps::GapKind;
    use crate::models::results::ResultsResponse;
    use crate::view::gap_filter::{GapFilter, PriorityFilter, TypeFilter};
    use tempfile::TempDir;

    const RESULTS: &str = r#"{
        "session_id": "0f8fad5b-d9cb-469f-a165-70867728950e",
        "status": "partial",
        "overall_score": 61,
        "match_analysis": {
            "ats_score": {"score": 70, "explanation": "Readable <table> layout", "strengths": ["Keywords"]},
            "role_match_score": {"score": 60, "explanation": "ok"},
            "company_fit_score": {"score": 50, "explanation": "ok"},
            "overall_score": {"score": 61, "explanation": "ok", "key_strengths": ["Open source"]}
        },
        "gap_analysis": {
            "summary": {"total_gaps": 1, "high_priority_count": 1, "medium_priority_count": 0,
                        "low_priority_count": 0, "estimated_preparation_time": "4 weeks",
                        "overall_assessment": "Promising"},
            "resume_optimization_gaps": [{"gap_id": "r1", "title": "Quantify <b>impact</b>", "priority": "high",
                "recommendations": [{"action": "Add numbers", "before_example": "Built API",
                                     "after_example": "Built API serving 10k users"}]}],
            "quick_wins": [{"title": "Add LinkedIn", "estimated_time": "5 min"}]
        },
        "timeline": {
            "metadata": {"total_weeks": 4, "total_hours": 40, "hours_per_week": 10,
                         "intensity_level": "moderate", "feasibility_assessment": "Realistic"},
            "phases": [{"phase_id": "p1", "phase_number": 1, "title": "Resume", "start_week": 1,
                        "end_week": 1, "estimated_hours_per_week": 10,
                        "tasks": [{"task_id": "t1", "title": "Rewrite bullets", "priority": "high",
                                   "estimated_hours": 4}]}],
            "critical_path": ["t1"],
            "flexibility_notes": ["Swap weeks 2 and 3"],
            "motivation_tips": ["Track \"wins\" & losses"]
        }
    }"#;

    fn report(filter: GapFilter) -> ResultsReport {
        let results: ResultsResponse = serde_json::from_str(RESULTS).unwrap();
        ResultsReport::build(&results, &filter)
    }

    #[test]
    fn test_console_report_sections() {
        let output = ConsoleFormatter::new(false, true)
            .format_report(&report(GapFilter::default()))
            .unwrap();
        assert!(output.contains("Session: 0f8fad5b..."));
        assert!(output.contains("61/100 [Moderate Match]"));
        assert!(output.contains(PARTIAL_RESULTS_BADGE));
        assert!(output.contains("Quick Wins (Start Here!)"));
        assert!(output.contains("Detailed Gaps (1)"));
        assert!(output.contains("After:  Built API serving 10k users"));
        assert!(output.contains("Weeks 1-1 • 1 tasks • 10 hrs/week"));
        assert!(output.contains("Rewrite bullets"));
        assert!(output.contains(MOTIVATION_HEADING));
    }

    #[test]
    fn test_console_no_matches_notice() {
        let filter = GapFilter::new(TypeFilter::All, PriorityFilter::Only(Priority::Low));
        let output = ConsoleFormatter::new(false, false).format_report(&report(filter)).unwrap();
        assert!(output.contains("Detailed Gaps (0)"));
        assert!(output.contains(NO_MATCHES_MESSAGE));
    }

    #[test]
    fn test_json_report_is_valid() {
        let json = JsonFormatter::new(false)
            .format_report(&report(GapFilter::default()))
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["status"], "partial");
        assert_eq!(value["overall"]["label"], "Moderate Match");
        assert_eq!(value["gaps"]["gaps"][0]["type"], "resume");
    }

    #[test]
    fn test_markdown_report() {
        let md = MarkdownFormatter::new(false)
            .format_report(&report(GapFilter::default()))
            .unwrap();
        assert!(md.starts_with("# 🎯 Your Analysis Results"));
        assert!(md.contains("| 🤖 ATS Score | 70/100 |"));
        assert!(md.contains("### 🚨 Critical Path (Must Complete)"));
        assert!(!md.contains("**Generated:**"));
    }

    #[test]
    fn test_html_report_escapes_backend_text() {
        let html = HtmlFormatter::new(false)
            .format_report(&report(GapFilter::default()))
            .unwrap();
        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains("Readable &lt;table&gt; layout"));
        assert!(html.contains("score-fair"));
        assert!(!html.contains("<style>"));
    }

    #[test]
    fn test_html_sections_escape_every_backend_field() {
        let html = HtmlFormatter::new(true)
            .format_report(&report(GapFilter::default()))
            .unwrap();
        assert!(html.contains("<style>"));
        assert!(html.contains("Quantify &lt;b&gt;impact&lt;/b&gt;"));
        assert!(!html.contains("<b>impact</b>"));
        assert!(html.contains("&amp; losses"));
        assert!(html.contains("priority-high"));
        assert!(html.contains("Phase 1: Resume"));
        assert!(html.contains("<li>Rewrite bullets (4h)</li>"));
        assert!(html.contains(PARTIAL_RESULTS_BADGE));
    }

    #[test]
    fn test_html_filter_without_matches() {
        let filter = GapFilter::new(TypeFilter::Only(GapKind::Technical), PriorityFilter::All);
        let html = HtmlFormatter::new(false).format_report(&report(filter)).unwrap();
        assert!(html.contains("Detailed Gaps (0)"));
        assert!(html.contains(NO_MATCHES_MESSAGE));
        assert!(html.contains("Filtered by"));
    }

    #[test]
    fn test_generator_dispatches_by_format() {
        let generator = ReportGenerator::with_options(false, false, true, true, true);
        let md = generator
            .generate_report(&report(GapFilter::default()), &OutputFormat::Markdown)
            .unwrap();
        assert!(md.contains("## Score Breakdown"));
    }

    #[test]
    fn test_save_and_filename() {
        let temp_dir = TempDir::new().unwrap();
        let name = suggest_filename(&OutputFormat::Html, "0f8fad5b-d9cb", false);
        assert_eq!(name, "ready2intern_0f8fad5b.html");

        let path = resolve_save_path(temp_dir.path(), &OutputFormat::Json, "abc");
        assert!(path.starts_with(temp_dir.path()));
        assert!(path.to_string_lossy().ends_with(".json"));

        let file = temp_dir.path().join("out").join("report.md");
        save_report_to_file("# hi", &file).unwrap();
        assert_eq!(std::fs::read_to_string(file).unwrap(), "# hi");
    }
}
