// Tests for flow aggregation

use jobflow_core::model::{ApplicationRecord, FlowStage, SankeyFlows};
use jobflow_core::{build_flows, summarize};
use std::collections::HashSet;

fn record(
    country: Option<&str>,
    prestige: Option<&str>,
    status: Option<&str>,
    response: Option<&str>,
) -> ApplicationRecord {
    ApplicationRecord::new(country, prestige, status, response)
}

fn sample_records() -> Vec<ApplicationRecord> {
    vec![
        record(Some("Germany"), Some("Tier 1"), Some("Applied"), Some("Negative")),
        record(Some("Germany"), Some("Tier 2"), Some("Applied"), None),
        record(None, Some("Tier 1"), Some("Not Applied"), None),
        record(Some("France"), Some("Tier 1"), Some("Applied"), Some("Interview")),
        record(Some("Germany"), Some("Tier 1"), None, Some("Negative")),
        record(Some("France"), None, Some("Applied"), Some("Pending")),
    ]
}

fn labelled_edges(flows: &SankeyFlows, stage: FlowStage) -> Vec<(String, String, u64)> {
    flows
        .edges_in(stage)
        .map(|e| {
            let (source, target, value) = flows.edge_labels(e);
            (source.to_string(), target.to_string(), value)
        })
        .collect()
}

fn edge(source: &str, target: &str, value: u64) -> (String, String, u64) {
    (source.to_string(), target.to_string(), value)
}

// ============================================================================
// Structural invariants
// ============================================================================

#[test]
fn test_labels_are_unique() {
    let flows = build_flows(&sample_records());
    let unique: HashSet<&String> = flows.labels.iter().collect();
    assert_eq!(unique.len(), flows.labels.len());
}

#[test]
fn test_every_edge_endpoint_is_a_node() {
    let flows = build_flows(&sample_records());
    for e in &flows.edges {
        assert!(e.source < flows.labels.len());
        assert!(e.target < flows.labels.len());
    }
}

#[test]
fn test_parallel_arrays_line_up() {
    let flows = build_flows(&sample_records());
    assert_eq!(flows.sources().len(), flows.edges.len());
    assert_eq!(flows.targets().len(), flows.edges.len());
    assert_eq!(flows.values().len(), flows.edges.len());
    assert!(flows.values().iter().all(|&v| v > 0));
}

#[test]
fn test_hub_outflow_equals_row_count() {
    let records = sample_records();
    let flows = build_flows(&records);
    assert_eq!(flows.outflow("Total Opportunities"), records.len() as u64);
}

#[test]
fn test_response_flow_equals_applied_rows() {
    let records = sample_records();
    let flows = build_flows(&records);

    let applied = records
        .iter()
        .filter(|r| r.applied_label() == "Applied")
        .count() as u64;
    let response_total: u64 = flows
        .edges_in(FlowStage::AppliedToResponse)
        .map(|e| e.value)
        .sum();

    assert_eq!(applied, 4);
    assert_eq!(response_total, applied);
}

#[test]
fn test_stages_emitted_in_diagram_order() {
    let flows = build_flows(&sample_records());
    let stages: Vec<FlowStage> = flows.edges.iter().map(|e| e.stage).collect();

    let mut sorted = stages.clone();
    sorted.sort_by_key(|s| FlowStage::ALL.iter().position(|x| x == s));
    assert_eq!(stages, sorted);
}

// ============================================================================
// Individual passes
// ============================================================================

#[test]
fn test_country_to_prestige_sorted_by_group() {
    let flows = build_flows(&sample_records());

    assert_eq!(
        labelled_edges(&flows, FlowStage::CountryToPrestige),
        vec![
            edge("France", "Tier 1", 1),
            edge("Germany", "Tier 1", 2),
            edge("Germany", "Tier 2", 1),
            edge("Various", "Tier 1", 1),
        ]
    );
}

#[test]
fn test_missing_country_maps_to_various() {
    let flows = build_flows(&[record(None, Some("Tier 3"), Some("Applied"), None)]);
    assert!(flows.index_of("Various").is_some());
    assert_eq!(flows.outflow("Various"), 1);
}

#[test]
fn test_prestige_to_hub_by_descending_count() {
    let flows = build_flows(&sample_records());

    assert_eq!(
        labelled_edges(&flows, FlowStage::PrestigeToHub),
        vec![
            edge("Tier 1", "Total Opportunities", 4),
            edge("Tier 2", "Total Opportunities", 1),
        ]
    );
}

#[test]
fn test_missing_prestige_skipped_from_prestige_flows() {
    let records = sample_records();
    let flows = build_flows(&records);

    assert_eq!(flows.inflow("Total Opportunities"), 5);
    assert_eq!(flows.outflow("Total Opportunities"), 6);
    assert_eq!(summarize(&records, &flows).missing_prestige, 1);
}

#[test]
fn test_hub_to_status_includes_unknown() {
    let flows = build_flows(&sample_records());

    assert_eq!(
        labelled_edges(&flows, FlowStage::HubToStatus),
        vec![
            edge("Total Opportunities", "Applied", 4),
            edge("Total Opportunities", "Not Applied", 1),
            edge("Total Opportunities", "Unknown", 1),
        ]
    );
}

#[test]
fn test_applied_to_response_renames_labels() {
    let flows = build_flows(&sample_records());

    assert_eq!(
        labelled_edges(&flows, FlowStage::AppliedToResponse),
        vec![
            edge("Applied", "Response Pending", 2),
            edge("Applied", "Negative Response", 1),
            edge("Applied", "Interview", 1),
        ]
    );
    assert!(flows.index_of("Negative").is_none());
    assert!(flows.index_of("Pending").is_none());
}

#[test]
fn test_non_applied_rows_have_no_response_flow() {
    let flows = build_flows(&[
        record(Some("Spain"), Some("Tier 1"), Some("Not Applied"), Some("Negative")),
        record(Some("Spain"), Some("Tier 1"), Some("Withdrawn"), None),
    ]);

    assert_eq!(flows.edges_in(FlowStage::AppliedToResponse).count(), 0);
    assert!(flows.index_of("Applied").is_none());
    assert!(flows.index_of("Negative Response").is_none());
}

#[test]
fn test_three_row_sample_response_edges() {
    let flows = build_flows(&[
        record(Some("Germany"), Some("Tier 1"), Some("Applied"), Some("Negative")),
        record(Some("Germany"), Some("Tier 2"), Some("Applied"), Some("Pending")),
        record(None, Some("Tier 1"), Some("Applied"), Some("Interview")),
    ]);

    let responses = labelled_edges(&flows, FlowStage::AppliedToResponse);
    let negative: Vec<_> = responses
        .iter()
        .filter(|(_, t, _)| t == "Negative Response")
        .collect();
    let pending: Vec<_> = responses
        .iter()
        .filter(|(_, t, _)| t == "Response Pending")
        .collect();

    assert_eq!(negative.len(), 1);
    assert_eq!(negative[0].2, 1);
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].2, 1);
}

#[test]
fn test_missing_and_explicit_pending_merge() {
    let flows = build_flows(&[
        record(Some("Germany"), Some("Tier 1"), Some("Applied"), Some("Pending")),
        record(Some("Germany"), Some("Tier 1"), Some("Applied"), None),
    ]);

    assert_eq!(
        labelled_edges(&flows, FlowStage::AppliedToResponse),
        vec![edge("Applied", "Response Pending", 2)]
    );
}

#[test]
fn test_node_order_is_first_seen() {
    let flows = build_flows(&[record(Some("Norway"), Some("Tier 2"), Some("Applied"), None)]);

    assert_eq!(
        flows.labels,
        vec![
            "Norway",
            "Tier 2",
            "Total Opportunities",
            "Applied",
            "Response Pending"
        ]
    );
}

#[test]
fn test_empty_input_builds_empty_flows() {
    let flows = build_flows(&[]);
    assert!(flows.labels.is_empty());
    assert!(flows.edges.is_empty());
}

// ============================================================================
// Summary
// ============================================================================

#[test]
fn test_summary_counts() {
    let records = sample_records();
    let flows = build_flows(&records);
    let summary = summarize(&records, &flows);

    assert_eq!(summary.total_rows, 6);
    assert_eq!(summary.hub_outflow, 6);
    assert_eq!(summary.applied_rows, 4);
    assert_eq!(summary.node_count, flows.labels.len());
    assert_eq!(summary.edge_count, flows.edges.len());
    assert_eq!(summary.country_edges, 4);
    assert_eq!(summary.prestige_edges, 2);
    assert_eq!(summary.status_edges, 3);
    assert_eq!(summary.response_edges, 3);
}
