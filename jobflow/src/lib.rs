// Include handlers module directly from handlers.rs
#[path = "handlers.rs"]
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{RenderOptions, RenderOutcome, expand_path, run};

// Re-export the pipeline from jobflow-core
pub use jobflow_core::{FlowError, SankeyFlows, build_flows, read_records, summarize};
