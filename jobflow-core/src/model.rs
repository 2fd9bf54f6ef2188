use serde::{Deserialize, Serialize};

pub const COUNTRY_COLUMN: &str = "Country";
pub const PRESTIGE_COLUMN: &str = "Company Prestige";
pub const STATUS_COLUMN: &str = "Application Status";
pub const RESPONSE_COLUMN: &str = "First Response Result";

/// Columns the tracker export must carry. Anything else is ignored.
pub const REQUIRED_COLUMNS: [&str; 4] = [
    COUNTRY_COLUMN,
    PRESTIGE_COLUMN,
    STATUS_COLUMN,
    RESPONSE_COLUMN,
];

pub const VARIOUS: &str = "Various";
pub const UNKNOWN: &str = "Unknown";
pub const PENDING: &str = "Pending";
pub const NEGATIVE: &str = "Negative";

/// Central node that every prestige level flows into and every status flows out of
pub const HUB: &str = "Total Opportunities";
pub const APPLIED: &str = "Applied";
pub const NEGATIVE_RESPONSE: &str = "Negative Response";
pub const RESPONSE_PENDING: &str = "Response Pending";

/// Cell values treated as null, matching what spreadsheet exports and
/// pandas-style readers consider "not available".
const NA_MARKERS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

pub fn is_missing(value: &str) -> bool {
    value.is_empty() || NA_MARKERS.contains(&value)
}

/// One row of the application tracker
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ApplicationRecord {
    #[serde(rename = "Country")]
    pub country: Option<String>,
    #[serde(rename = "Company Prestige")]
    pub company_prestige: Option<String>,
    #[serde(rename = "Application Status")]
    pub application_status: Option<String>,
    #[serde(rename = "First Response Result")]
    pub first_response: Option<String>,
}

impl ApplicationRecord {
    pub fn new(
        country: Option<&str>,
        company_prestige: Option<&str>,
        application_status: Option<&str>,
        first_response: Option<&str>,
    ) -> Self {
        Self {
            country: country.map(String::from),
            company_prestige: company_prestige.map(String::from),
            application_status: application_status.map(String::from),
            first_response: first_response.map(String::from),
        }
        .normalized()
    }

    /// Collapse NA markers into `None` so the label accessors only ever see real values
    pub fn normalized(self) -> Self {
        fn clean(value: Option<String>) -> Option<String> {
            value.filter(|v| !is_missing(v))
        }

        Self {
            country: clean(self.country),
            company_prestige: clean(self.company_prestige),
            application_status: clean(self.application_status),
            first_response: clean(self.first_response),
        }
    }

    pub fn country_label(&self) -> &str {
        self.country.as_deref().unwrap_or(VARIOUS)
    }

    /// Prestige is never filled in; rows without one have no prestige node.
    pub fn prestige(&self) -> Option<&str> {
        self.company_prestige.as_deref()
    }

    pub fn applied_label(&self) -> &str {
        self.application_status.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn response_label(&self) -> &str {
        self.first_response.as_deref().unwrap_or(PENDING)
    }

    pub fn is_applied(&self) -> bool {
        self.applied_label() == APPLIED
    }
}

/// Rename response groups for display once they have been counted
pub fn display_response(response: &str) -> &str {
    match response {
        NEGATIVE => NEGATIVE_RESPONSE,
        PENDING => RESPONSE_PENDING,
        other => other,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowStage {
    CountryToPrestige,
    PrestigeToHub,
    HubToStatus,
    AppliedToResponse,
}

impl FlowStage {
    pub const ALL: [FlowStage; 4] = [
        FlowStage::CountryToPrestige,
        FlowStage::PrestigeToHub,
        FlowStage::HubToStatus,
        FlowStage::AppliedToResponse,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FlowStage::CountryToPrestige => "Country -> Company Prestige",
            FlowStage::PrestigeToHub => "Company Prestige -> Total Opportunities",
            FlowStage::HubToStatus => "Total Opportunities -> Application Status",
            FlowStage::AppliedToResponse => "Applied -> First Response",
        }
    }
}

/// A single link of the diagram, addressed by node index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowEdge {
    pub source: usize,
    pub target: usize,
    pub value: u64,
    pub stage: FlowStage,
}

/// Node labels plus every edge, in the order the passes emitted them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SankeyFlows {
    pub labels: Vec<String>,
    pub edges: Vec<FlowEdge>,
}

impl SankeyFlows {
    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    pub fn sources(&self) -> Vec<usize> {
        self.edges.iter().map(|e| e.source).collect()
    }

    pub fn targets(&self) -> Vec<usize> {
        self.edges.iter().map(|e| e.target).collect()
    }

    pub fn values(&self) -> Vec<u64> {
        self.edges.iter().map(|e| e.value).collect()
    }

    pub fn edges_in(&self, stage: FlowStage) -> impl Iterator<Item = &FlowEdge> {
        self.edges.iter().filter(move |e| e.stage == stage)
    }

    /// Resolve an edge back to (source label, target label, value)
    pub fn edge_labels(&self, edge: &FlowEdge) -> (&str, &str, u64) {
        (
            self.label(edge.source).unwrap_or("?"),
            self.label(edge.target).unwrap_or("?"),
            edge.value,
        )
    }

    pub fn outflow(&self, label: &str) -> u64 {
        match self.index_of(label) {
            Some(idx) => self.edges.iter().filter(|e| e.source == idx).map(|e| e.value).sum(),
            None => 0,
        }
    }

    pub fn inflow(&self, label: &str) -> u64 {
        match self.index_of(label) {
            Some(idx) => self.edges.iter().filter(|e| e.target == idx).map(|e| e.value).sum(),
            None => 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowSummary {
    pub total_rows: usize,
    pub hub_outflow: u64,
    pub applied_rows: usize,
    pub missing_prestige: usize,
    pub node_count: usize,
    pub edge_count: usize,
    pub country_edges: usize,
    pub prestige_edges: usize,
    pub status_edges: usize,
    pub response_edges: usize,
}
