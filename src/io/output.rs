use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::GraphResponse;
use crate::stages::NormalizeStats;

impl GraphResponse {
    /// Write to a JSON file
    pub fn write_json(&self, path: &Path, pretty: bool) -> Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        if pretty {
            serde_json::to_writer_pretty(file, self).context("Failed to write JSON")?;
        } else {
            serde_json::to_writer(file, self).context("Failed to write JSON")?;
        }
        Ok(())
    }
}

/// Plain-text summary of one normalization pass
pub struct AnalysisReport<'a> {
    source: &'a Path,
    stats: NormalizeStats,
    graph: &'a GraphResponse,
}

impl<'a> AnalysisReport<'a> {
    pub fn new(source: &'a Path, stats: NormalizeStats, graph: &'a GraphResponse) -> Self {
        Self {
            source,
            stats,
            graph,
        }
    }

    pub fn format(&self) -> String {
        let mut output = String::new();
        let stats = &self.stats;

        let _ = writeln!(output, "HFMEA Source Analysis");
        let _ = writeln!(output, "=====================");
        let _ = writeln!(output, "Source: {}", self.source.display());
        let _ = writeln!(output, "Data lines: {}", stats.data_lines);
        let _ = writeln!(output, "Blank lines: {}", stats.blank);
        let _ = writeln!(output, "Clean rows: {}", stats.clean);
        let _ = writeln!(output, "Repaired rows (split effect): {}", stats.repaired);
        let _ = writeln!(output, "Dropped rows: {}", stats.dropped);
        let _ = writeln!(output);
        let _ = writeln!(output, "Graph");
        let _ = writeln!(output, "-----");
        let _ = writeln!(output, "Nodes: {}", self.graph.nodes.len());
        let _ = writeln!(output, "Edges: {}", self.graph.edges.len());

        output
    }
}
