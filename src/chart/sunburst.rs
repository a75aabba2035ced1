//! Top channel popularity: category -> channel sunburst sized by views

use std::collections::BTreeMap;

use charming::{
    Chart,
    element::{Tooltip, Trigger},
    series::{Sunburst, SunburstNode},
};
use serde::Serialize;

use super::base_chart;
use crate::dataset::Row;

/// Rows taken from the front of the filtered set. Rows are taken in the
/// order they arrive, before any aggregation.
pub const TOP_CHANNEL_ROWS: usize = 50;

/// A node in the category -> channel hierarchy
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartitionNode {
    pub name: String,
    /// Summed views; for a category, the sum of its channels
    pub value: u64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<PartitionNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SunburstSpec {
    pub title: String,
    pub subtitle: String,
    /// Number of filtered rows that contributed
    pub rows_used: usize,
    /// Category nodes in name order, channels nested in name order
    pub nodes: Vec<PartitionNode>,
}

impl SunburstSpec {
    /// Sum over every category node
    pub fn total_value(&self) -> u64 {
        saturating_sum(self.nodes.iter().map(|n| n.value))
    }
}

fn saturating_sum(values: impl IntoIterator<Item = u64>) -> u64 {
    values.into_iter().fold(0, u64::saturating_add)
}

pub(super) fn build(rows: &[&Row]) -> SunburstSpec {
    let head = &rows[..rows.len().min(TOP_CHANNEL_ROWS)];

    let mut tree: BTreeMap<&str, BTreeMap<&str, u64>> = BTreeMap::new();
    for row in head {
        let views = tree
            .entry(row.category_name.as_str())
            .or_default()
            .entry(row.channel_title.as_str())
            .or_default();
        *views = views.saturating_add(row.view_count);
    }

    let nodes: Vec<PartitionNode> = tree
        .into_iter()
        .map(|(category, channels)| {
            let children: Vec<PartitionNode> = channels
                .into_iter()
                .map(|(channel, views)| PartitionNode {
                    name: channel.to_string(),
                    value: views,
                    children: Vec::new(),
                })
                .collect();
            PartitionNode {
                name: category.to_string(),
                value: saturating_sum(children.iter().map(|c| c.value)),
                children,
            }
        })
        .collect();

    SunburstSpec {
        title: format!("Top {} Most Popular Channels", TOP_CHANNEL_ROWS),
        subtitle: format!("First {} of {} filtered videos", head.len(), rows.len()),
        rows_used: head.len(),
        nodes,
    }
}

fn to_node(node: &PartitionNode) -> SunburstNode {
    let mut out = SunburstNode::new(node.name.as_str()).value(node.value as f64);
    if !node.children.is_empty() {
        out = out.children(node.children.iter().map(to_node).collect());
    }
    out
}

pub(super) fn render(spec: &SunburstSpec) -> Chart {
    base_chart(&spec.title, &spec.subtitle)
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .formatter("{b}<br/>View Count: {c}"),
        )
        .series(
            Sunburst::new()
                .name("View Count")
                .data(spec.nodes.iter().map(to_node).collect()),
        )
}
