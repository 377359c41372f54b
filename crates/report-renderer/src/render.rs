use std::fmt::Write as _;
use std::str::FromStr;

use analysis_core::AnalysisError;
use serde::{Deserialize, Serialize};

use crate::Report;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Markdown,
    Json,
}

impl FromStr for OutputFormat {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "json" => Ok(OutputFormat::Json),
            other => Err(AnalysisError::Parse(format!(
                "unknown output format {:?} (expected text, markdown or json)",
                other
            ))),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OutputFormat::Text => "text",
            OutputFormat::Markdown => "markdown",
            OutputFormat::Json => "json",
        };
        f.write_str(name)
    }
}

pub fn render(report: &Report, format: OutputFormat) -> Result<String, AnalysisError> {
    match format {
        OutputFormat::Text => Ok(render_text(report)),
        OutputFormat::Markdown => Ok(render_markdown(report)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
    }
}

pub fn render_text(report: &Report) -> String {
    // Writing to a String cannot fail
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Quantamental Report | {} ({}) | {}",
        report.company,
        report.ticker,
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    for section in &report.sections {
        let _ = writeln!(out);
        let _ = writeln!(out, "== {} ==", section.title);
        if let Some(headline) = &section.headline {
            let _ = writeln!(out, "{}", headline);
        }
        for line in &section.lines {
            let _ = writeln!(out, "  - {}", line);
        }
    }
    out
}

pub fn render_markdown(report: &Report) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {} ({})", report.company, report.ticker);
    let _ = writeln!(
        out,
        "_Generated {}_",
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    for section in &report.sections {
        let _ = writeln!(out);
        let _ = writeln!(out, "## {}", section.title);
        if let Some(headline) = &section.headline {
            let _ = writeln!(out);
            let _ = writeln!(out, "**{}**", headline);
        }
        let _ = writeln!(out);
        for line in &section.lines {
            let _ = writeln!(out, "- {}", line);
        }
    }
    out
}
