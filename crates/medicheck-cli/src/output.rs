//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use crate::history::HistoryEntry;
use colored::*;
use medicheck_domain::{AnalysisResult, DrugCandidate, DrugInfo, RegistryStatus, Severity};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format an analysis result.
    pub fn format_analysis(&self, result: &AnalysisResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
            OutputFormat::Table => Ok(self.format_analysis_table(result)),
            OutputFormat::Quiet => Ok(result
                .interactions
                .iter()
                .map(|r| format!("{}\t{}\t{}", r.severity, r.drug_a, r.drug_b))
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    fn format_analysis_table(&self, result: &AnalysisResult) -> String {
        let mut output = String::new();

        if result.interactions.is_empty() {
            output.push_str(&self.success("No interactions found."));
        } else {
            let mut builder = Builder::default();
            builder.push_record(["Severity", "Drugs", "Confidence", "Description", "Recommendations"]);

            for record in &result.interactions {
                builder.push_record([
                    self.severity_label(record.severity),
                    format!("{} + {}", record.drug_a, record.drug_b),
                    record.confidence.to_string(),
                    record.description.clone(),
                    record.recommendations.clone(),
                ]);
            }

            let mut table = builder.build();
            table
                .with(Style::rounded())
                .with(Modify::new(Rows::first()).with(Alignment::center()));
            output.push_str(&table.to_string());
        }

        let provenance = &result.provenance;
        output.push('\n');
        output.push_str(&self.info(&format!(
            "Resolved {}/{} drugs; {} knowledge base match(es); {} model record(s)",
            provenance.references_resolved,
            provenance.references_total,
            provenance.knowledge_base_matches,
            provenance.narrative_records,
        )));
        if let RegistryStatus::Failed { reason } = &provenance.registry {
            output.push('\n');
            output.push_str(&self.warning(&format!("Official database unavailable: {}", reason)));
        }
        output
    }

    /// Format catalog search hits.
    pub fn format_candidates(&self, candidates: &[DrugCandidate]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(candidates)?),
            OutputFormat::Quiet => Ok(candidates
                .iter()
                .map(|c| c.name.clone())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if candidates.is_empty() {
                    return Ok(self.colorize("No matching drugs found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Name", "RxCUI"]);
                for candidate in candidates {
                    builder.push_record([candidate.name.as_str(), candidate.rxcui.as_str()]);
                }
                let mut table = builder.build();
                table.with(Style::rounded());
                Ok(table.to_string())
            }
        }
    }

    /// Format a drug monograph.
    pub fn format_drug_info(&self, info: &DrugInfo) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(info)?),
            OutputFormat::Quiet => Ok(info.overview.clone()),
            OutputFormat::Table => {
                let mut lines = vec![self.colorize(&info.name, "cyan")];
                if !info.drug_class.is_empty() {
                    lines.push(format!("Class: {}", info.drug_class));
                }
                if !info.overview.is_empty() {
                    lines.push(String::new());
                    lines.push(info.overview.clone());
                }
                if !info.dosing_guidelines.is_empty() {
                    lines.push(String::new());
                    lines.push(format!("Dosing: {}", info.dosing_guidelines));
                }
                push_list(&mut lines, "Side effects", &info.side_effects);
                push_list(&mut lines, "Contraindications", &info.contraindications);
                push_list(&mut lines, "Warnings", &info.warnings);
                push_list(&mut lines, "Interacts with", &info.interactions);
                Ok(lines.join("\n"))
            }
        }
    }

    /// Format the recent-check history.
    pub fn format_history(&self, entries: &[HistoryEntry]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(entries)?),
            OutputFormat::Quiet => Ok(entries
                .iter()
                .map(|e| e.drugs.join(","))
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if entries.is_empty() {
                    return Ok(self.colorize("No recent checks.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["#", "Drugs", "ID"]);
                for (i, entry) in entries.iter().enumerate() {
                    builder.push_record([
                        (i + 1).to_string(),
                        entry.drugs.join(", "),
                        entry.id.chars().take(8).collect(),
                    ]);
                }
                let mut table = builder.build();
                table.with(Style::rounded());
                Ok(table.to_string())
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn severity_label(&self, severity: Severity) -> String {
        let label = severity.as_str().to_uppercase();
        match severity {
            Severity::Critical | Severity::Major => self.colorize(&label, "red"),
            Severity::Moderate => self.colorize(&label, "yellow"),
            Severity::Minor => self.colorize(&label, "green"),
        }
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

fn push_list(lines: &mut Vec<String>, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    lines.push(String::new());
    lines.push(format!("{}:", title));
    lines.extend(items.iter().map(|item| format!("  - {}", item)));
}
