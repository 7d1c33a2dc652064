use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::io::read_records;
use crate::models::{
    GraphEdge, GraphNode, GraphResponse, HfmeaRecord, MISSING_LABEL, NodeCategory,
};

/// Vertical distance between consecutive rows
pub const ROW_SPACING: f64 = 2.5;

/// Layout state carried from one row to the next
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowCursor {
    /// Id number given to the next node
    pub next_id: u64,
    /// `y` shared by the nodes of the next row
    pub y: f64,
}

impl Default for RowCursor {
    fn default() -> Self {
        Self { next_id: 0, y: 0.0 }
    }
}

/// Nodes and edges produced for one record
#[derive(Debug, Clone)]
pub struct RowGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

/// Lay out one record as a five-node chain.
///
/// Returns the row's nodes and edges together with the cursor for the next row:
/// ids advance by one per node, `y` drops by [`ROW_SPACING`] once per row.
pub fn build_row(record: &HfmeaRecord, cursor: RowCursor) -> (RowGraph, RowCursor) {
    let mut next_id = cursor.next_id;
    let nodes: Vec<GraphNode> = NodeCategory::CHAIN
        .iter()
        .map(|&category| {
            let id = format!("node_{}", next_id);
            next_id += 1;
            GraphNode {
                id,
                label: record
                    .label_for(category)
                    .unwrap_or(MISSING_LABEL)
                    .to_string(),
                category,
                x: category.column(),
                y: cursor.y,
                severity: record.severity.clone(),
                occurrence: record.occurrence.clone(),
                detectability: record.detectability.clone(),
                risk_priority_number: record.risk_priority_number.clone(),
            }
        })
        .collect();

    let edges = nodes
        .windows(2)
        .map(|pair| GraphEdge {
            source: pair[0].id.clone(),
            target: pair[1].id.clone(),
        })
        .collect();

    let next = RowCursor {
        next_id,
        y: cursor.y - ROW_SPACING,
    };

    (RowGraph { nodes, edges }, next)
}

/// Build the graph for an in-memory sequence of records
pub fn build_graph<I>(records: I) -> GraphResponse
where
    I: IntoIterator<Item = HfmeaRecord>,
{
    let mut graph = GraphResponse::empty();
    let mut cursor = RowCursor::default();
    for record in records {
        cursor = push_row(&mut graph, &record, cursor);
    }
    graph
}

/// Build the graph from a fallible record stream, stopping at the first error
pub fn try_build_graph<I>(records: I) -> Result<GraphResponse>
where
    I: IntoIterator<Item = Result<HfmeaRecord>>,
{
    let mut graph = GraphResponse::empty();
    let mut cursor = RowCursor::default();
    for record in records {
        cursor = push_row(&mut graph, &record?, cursor);
    }
    Ok(graph)
}

fn push_row(graph: &mut GraphResponse, record: &HfmeaRecord, cursor: RowCursor) -> RowCursor {
    let (row, next) = build_row(record, cursor);
    graph.nodes.extend(row.nodes);
    graph.edges.extend(row.edges);
    next
}

/// Read, normalize and lay out the source file at `path`
pub fn graph_from_file(path: &Path) -> Result<GraphResponse> {
    let reader = read_records(path)?;
    let graph = try_build_graph(reader)?;
    debug!(
        "Built graph from {:?}: {} nodes, {} edges",
        path,
        graph.nodes.len(),
        graph.edges.len()
    );
    Ok(graph)
}
