//! Structured analysis report
//!
//! Turns the incidents of an analysed document into either machine-readable
//! JSON or one `file:line:column: message` line per incident.

use serde::Serialize;

use crate::frontend::context::{Context, Incident};
use crate::frontend::declaration::DocumentData;

// ==================== Report ====================

/// Complete result of analysing one document
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// No incidents were found
    pub success: bool,

    /// Source file
    pub source_file: String,

    /// Incidents in order of discovery
    pub incidents: Vec<IncidentReport>,

    pub stats: AnalysisStats,
}

#[derive(Debug, Clone, Serialize)]
pub struct IncidentReport {
    pub message: String,

    /// Missing for incidents not tied to a node
    pub location: Option<Location>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub file: String,
    pub line: u32,
    pub column: u32,
    pub end_line: u32,
    pub end_column: u32,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AnalysisStats {
    /// Number of user functions
    pub function_count: usize,

    /// Number of enums, structs and aliases
    pub type_count: usize,

    pub global_count: usize,

    pub incident_count: usize,

    /// Functions, types and values referenced anywhere, sorted
    pub used_symbols: Vec<String>,

    /// Analysis time
    pub analysis_time_ms: u64,
}

// ==================== Conversion ====================

impl IncidentReport {
    pub fn from_incident(incident: &Incident, file_name: &str) -> Self {
        let location = incident.node.map(|node| Location {
            file: file_name.to_string(),
            line: node.range.start_line,
            column: node.range.start_column,
            end_line: node.range.end_line,
            end_column: node.range.end_column,
        });

        Self {
            message: incident.message.clone(),
            location,
        }
    }

    /// `file:line:column: message`, or `file: message` without a location
    pub fn to_line(&self, file_name: &str) -> String {
        match &self.location {
            Some(location) => format!("{}:{}:{}: {}", location.file, location.line, location.column, self.message),
            None => format!("{}: {}", file_name, self.message),
        }
    }
}

impl AnalysisReport {
    /// Build the report of an analysed document
    pub fn from_analysis(source_file: String, context: &Context, document: &DocumentData, analysis_time_ms: u64) -> Self {
        let incidents: Vec<IncidentReport> = context
            .incidents()
            .iter()
            .map(|incident| IncidentReport::from_incident(incident, &source_file))
            .collect();

        let mut used_symbols: Vec<String> = context.used_symbols().iter().cloned().collect();
        used_symbols.sort();

        let stats = AnalysisStats {
            function_count: document.functions,
            type_count: document.types,
            global_count: document.globals,
            incident_count: incidents.len(),
            used_symbols,
            analysis_time_ms,
        };

        Self {
            success: incidents.is_empty(),
            source_file,
            incidents,
            stats,
        }
    }

    /// Output as JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// One line per incident, at most `max_incidents` of them
    pub fn to_text(&self, max_incidents: Option<usize>) -> String {
        let shown = max_incidents.unwrap_or(self.incidents.len()).min(self.incidents.len());
        let mut lines: Vec<String> = self.incidents[..shown]
            .iter()
            .map(|incident| incident.to_line(&self.source_file))
            .collect();
        if shown < self.incidents.len() {
            lines.push(format!("... and {} more incidents", self.incidents.len() - shown));
        }
        lines.join("\n")
    }
}
