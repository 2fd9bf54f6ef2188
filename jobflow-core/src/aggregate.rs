// Building the four stages of the application flow diagram

use crate::model::{
    APPLIED, ApplicationRecord, FlowEdge, FlowStage, FlowSummary, HUB, SankeyFlows,
    display_response,
};
use crate::registry::NodeRegistry;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info, warn};

/// Accumulates labels and edges across the passes
struct FlowBuilder {
    nodes: NodeRegistry,
    edges: Vec<FlowEdge>,
}

impl FlowBuilder {
    fn new() -> Self {
        Self {
            nodes: NodeRegistry::new(),
            edges: Vec::new(),
        }
    }

    fn link(&mut self, stage: FlowStage, source: &str, target: &str, value: u64) {
        let source = self.nodes.index_of(source);
        let target = self.nodes.index_of(target);
        self.edges.push(FlowEdge {
            source,
            target,
            value,
            stage,
        });
    }

    fn finish(self) -> SankeyFlows {
        SankeyFlows {
            labels: self.nodes.into_labels(),
            edges: self.edges,
        }
    }
}

/// Run all four passes over the records, in diagram order
pub fn build_flows(records: &[ApplicationRecord]) -> SankeyFlows {
    let mut builder = FlowBuilder::new();

    country_to_prestige(&mut builder, records);
    prestige_to_hub(&mut builder, records);
    hub_to_status(&mut builder, records);
    applied_to_response(&mut builder, records);

    let flows = builder.finish();
    debug!(
        "Built {} nodes and {} edges from {} records",
        flows.labels.len(),
        flows.edges.len(),
        records.len()
    );
    flows
}

/// Count occurrences, largest group first. Equal counts keep first-seen order.
fn value_counts<'a>(values: impl Iterator<Item = &'a str>) -> Vec<(&'a str, u64)> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, u64> = HashMap::new();

    for value in values {
        let count = counts.entry(value).or_insert_with(|| {
            order.push(value);
            0
        });
        *count += 1;
    }

    let mut grouped: Vec<(&str, u64)> = order.into_iter().map(|v| (v, counts[v])).collect();
    grouped.sort_by(|a, b| b.1.cmp(&a.1));
    grouped
}

fn country_to_prestige(builder: &mut FlowBuilder, records: &[ApplicationRecord]) {
    let mut groups: BTreeMap<(&str, &str), u64> = BTreeMap::new();
    for record in records {
        if let Some(prestige) = record.prestige() {
            *groups.entry((record.country_label(), prestige)).or_default() += 1;
        }
    }

    debug!("Country -> prestige: {} groups", groups.len());
    for ((country, prestige), count) in groups {
        builder.link(FlowStage::CountryToPrestige, country, prestige, count);
    }
}

fn prestige_to_hub(builder: &mut FlowBuilder, records: &[ApplicationRecord]) {
    let counts = value_counts(records.iter().filter_map(|r| r.prestige()));

    debug!("Prestige -> hub: {} groups", counts.len());
    for (prestige, count) in counts {
        builder.link(FlowStage::PrestigeToHub, prestige, HUB, count);
    }
}

fn hub_to_status(builder: &mut FlowBuilder, records: &[ApplicationRecord]) {
    let counts = value_counts(records.iter().map(|r| r.applied_label()));

    debug!("Hub -> status: {} groups", counts.len());
    for (status, count) in counts {
        builder.link(FlowStage::HubToStatus, HUB, status, count);
    }
}

fn applied_to_response(builder: &mut FlowBuilder, records: &[ApplicationRecord]) {
    let counts = value_counts(
        records
            .iter()
            .filter(|r| r.is_applied())
            .map(|r| r.response_label()),
    );

    debug!("Applied -> response: {} groups", counts.len());
    for (response, count) in counts {
        builder.link(
            FlowStage::AppliedToResponse,
            APPLIED,
            display_response(response),
            count,
        );
    }
}

/// Headline numbers for a built diagram
pub fn summarize(records: &[ApplicationRecord], flows: &SankeyFlows) -> FlowSummary {
    let stage_edges = |stage| flows.edges_in(stage).count();
    let missing_prestige = records.iter().filter(|r| r.prestige().is_none()).count();

    let summary = FlowSummary {
        total_rows: records.len(),
        hub_outflow: flows.outflow(HUB),
        applied_rows: records.iter().filter(|r| r.is_applied()).count(),
        missing_prestige,
        node_count: flows.labels.len(),
        edge_count: flows.edges.len(),
        country_edges: stage_edges(FlowStage::CountryToPrestige),
        prestige_edges: stage_edges(FlowStage::PrestigeToHub),
        status_edges: stage_edges(FlowStage::HubToStatus),
        response_edges: stage_edges(FlowStage::AppliedToResponse),
    };

    if missing_prestige > 0 {
        warn!(
            "{} record(s) have no company prestige and are left out of the prestige flows",
            missing_prestige
        );
    }
    info!(
        "{} applications, {} applied, {} nodes, {} edges",
        summary.total_rows, summary.applied_rows, summary.node_count, summary.edge_count
    );

    summary
}
