// Rendering the built flows as an interactive Sankey page, JSON or text

use crate::error::Result;
use crate::model::{FlowStage, FlowSummary, SankeyFlows};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub const DEFAULT_TITLE: &str = "Job Application Progress";
pub const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";
const PLOT_DIV_ID: &str = "jobflow-sankey";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    Html,
    Json,
    Text,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "html" | "htm" => Some(ReportFormat::Html),
            "json" => Some(ReportFormat::Json),
            "text" | "txt" => Some(ReportFormat::Text),
            _ => None,
        }
    }
}

/// Figure styling handed to plotly
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    pub title: String,
    pub font_size: u32,
    pub node_pad: u32,
    pub node_thickness: u32,
    pub node_color: String,
    pub line_color: String,
    pub line_width: f64,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            font_size: 12,
            node_pad: 15,
            node_thickness: 20,
            node_color: "blue".to_string(),
            line_color: "black".to_string(),
            line_width: 0.5,
        }
    }
}

/// The plotly figure (`data` + `layout`) describing the diagram
pub fn sankey_figure(flows: &SankeyFlows, options: &ChartOptions) -> Value {
    serde_json::json!({
        "data": [{
            "type": "sankey",
            "node": {
                "pad": options.node_pad,
                "thickness": options.node_thickness,
                "line": {
                    "color": options.line_color,
                    "width": options.line_width
                },
                "label": flows.labels,
                "color": options.node_color
            },
            "link": {
                "source": flows.sources(),
                "target": flows.targets(),
                "value": flows.values()
            }
        }],
        "layout": {
            "title": { "text": options.title },
            "font": { "size": options.font_size }
        }
    })
}

/// A standalone page that draws the diagram with plotly.js
pub fn generate_html_report(flows: &SankeyFlows, options: &ChartOptions) -> Result<String> {
    let figure = serde_json::to_string(&sankey_figure(flows, options))?;
    // A literal "</script>" inside a label would end the inline script early
    let figure = figure.replace("</", "<\\/");

    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8" />
    <title>{title}</title>
</head>
<body>
    <div id="{div}" style="height:100vh; width:100%;"></div>
    <script src="{cdn}" charset="utf-8"></script>
    <script type="text/javascript">
        var figure = {figure};
        Plotly.newPlot("{div}", figure.data, figure.layout, {{"responsive": true}});
    </script>
</body>
</html>
"#,
        title = escape_html(&options.title),
        div = PLOT_DIV_ID,
        cdn = PLOTLY_CDN,
        figure = figure,
    ))
}

pub fn generate_json_report(
    flows: &SankeyFlows,
    summary: &FlowSummary,
    options: &ChartOptions,
) -> Result<String> {
    let json_report = serde_json::json!({
        "report": {
            "metadata": {
                "generator": "jobflow",
                "version": env!("CARGO_PKG_VERSION"),
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "format": "json"
            },
            "summary": summary,
            "figure": sankey_figure(flows, options)
        }
    });

    Ok(serde_json::to_string_pretty(&json_report)?)
}

pub fn generate_text_report(flows: &SankeyFlows, summary: &FlowSummary, title: &str) -> String {
    let rule = "━".repeat(72);
    let mut report = String::new();

    report.push_str(&format!("{}\n", rule));
    report.push_str(&format!("  {}\n", title.to_uppercase()));
    report.push_str(&format!("{}\n\n", rule));

    report.push_str(&format!("Applications: {}\n", summary.total_rows));
    report.push_str(&format!("Applied:      {}\n", summary.applied_rows));
    report.push_str(&format!("Nodes:        {}\n", summary.node_count));
    report.push_str(&format!("Edges:        {}\n", summary.edge_count));
    if summary.missing_prestige > 0 {
        report.push_str(&format!(
            "No prestige:  {} (not shown in prestige flows)\n",
            summary.missing_prestige
        ));
    }
    report.push('\n');

    for stage in FlowStage::ALL {
        report.push_str(&format!("{}\n", stage.as_str()));
        report.push_str(&format!("{}\n", "─".repeat(stage.as_str().chars().count())));

        let mut any = false;
        for edge in flows.edges_in(stage) {
            let (source, target, value) = flows.edge_labels(edge);
            report.push_str(&format!("  {:>6}  {} → {}\n", value, source, target));
            any = true;
        }
        if !any {
            report.push_str("  (none)\n");
        }
        report.push('\n');
    }

    report
}

pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
