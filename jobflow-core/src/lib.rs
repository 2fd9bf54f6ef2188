pub mod aggregate;
pub mod error;
pub mod load;
pub mod model;
pub mod registry;
pub mod report;

pub use aggregate::{build_flows, summarize};
pub use error::{FlowError, Result};
pub use load::read_records;
pub use model::{ApplicationRecord, FlowEdge, FlowSummary, SankeyFlows};
pub use registry::NodeRegistry;

use colored::Colorize;

pub fn print_banner() {
    let banner = r#"
     _       _      __ _
    (_) ___ | |__  / _| | _____      __
    | |/ _ \| '_ \| |_| |/ _ \ \ /\ / /
    | | (_) | |_) |  _| | (_) \ V  V /
   _/ |\___/|_.__/|_| |_|\___/ \_/\_/
  |__/"#;
    println!("{}", banner.bright_blue().bold());
    println!(
        "  {} {}\n",
        "where did all those applications go?".bright_white(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
}
