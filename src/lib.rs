pub mod error;
pub mod io;
pub mod models;
pub mod server;
pub mod stages;

pub use error::{GraphError, Result};
pub use io::{AnalysisReport, RecordReader, read_records};
pub use models::{GraphEdge, GraphNode, GraphResponse, HfmeaRecord, NodeCategory};
pub use server::{AppState, ServerConfig, app_router, serve};
pub use stages::{
    LineOutcome, NormalizeStats, RowCursor, build_graph, build_row, graph_from_file,
    normalize_line, try_build_graph,
};
