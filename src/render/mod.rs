//! Report view: flatten a model into the shape the HTML page consumes.

pub mod html;

pub use html::render_html_report;

use crate::model::{Model, Node, Parameter};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct AttributeView {
    pub name: String,
    pub value: String,
    pub visible: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct NodeView {
    pub name: String,
    pub operator: String,
    pub category: String,

    /// Ids of producing nodes (or `input`).
    pub inputs: Vec<String>,

    /// Weight placeholders as `name: id`.
    pub initializers: Vec<String>,

    pub outputs: Vec<String>,
    pub attributes: Vec<AttributeView>,

    /// Chained sub-nodes, already flattened.
    pub chain: Vec<NodeView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TotalsView {
    pub layers: usize,
    pub nodes: usize,
    pub edges: usize,
    pub hidden_attributes: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportData {
    pub title: String,
    pub format: String,
    pub input: String,
    pub outputs: Vec<String>,
    pub nodes: Vec<NodeView>,
    pub totals: TotalsView,
}

/// Build report data for the first (only) graph of `model`.
pub fn build_report_data(title: &str, model: &Model) -> anyhow::Result<ReportData> {
    let Some(graph) = model.graphs().first() else {
        anyhow::bail!("model {} has no graph", title);
    };

    let input = graph
        .inputs
        .iter()
        .flat_map(|param| &param.arguments)
        .map(|arg| match arg.tensor_type() {
            Some(ty) => format!("{}: {}", arg.id, ty),
            None => arg.id.clone(),
        })
        .collect::<Vec<_>>()
        .join(", ");

    let nodes: Vec<NodeView> = graph.nodes.iter().map(node_view).collect();

    let edges: usize = graph.nodes.iter().map(|n| n.edge_inputs().len()).sum();
    let hidden_attributes: usize = nodes.iter().map(count_hidden).sum();

    Ok(ReportData {
        title: title.to_string(),
        format: model.format().to_string(),
        input,
        outputs: graph
            .outputs
            .iter()
            .flat_map(|param| {
                param
                    .arguments
                    .iter()
                    .map(move |arg| format!("{}: {}", param.name, arg.id))
            })
            .collect(),
        totals: TotalsView {
            layers: graph.nodes.len(),
            nodes: graph.node_count(),
            edges,
            hidden_attributes,
        },
        nodes,
    })
}

fn node_view(node: &Node) -> NodeView {
    let initializers = node
        .inputs
        .iter()
        .filter(|param| param.arguments.iter().any(|arg| arg.initializer.is_some()))
        .flat_map(|param: &Parameter| {
            param
                .arguments
                .iter()
                .map(move |arg| format!("{}: {}", param.name, arg.id))
        })
        .collect();

    NodeView {
        name: node.name.clone(),
        operator: node.operator.clone(),
        category: node.category.clone(),
        inputs: node.edge_inputs().into_iter().map(str::to_string).collect(),
        initializers,
        outputs: node.edge_outputs().into_iter().map(str::to_string).collect(),
        attributes: node
            .attributes
            .iter()
            .map(|attr| AttributeView {
                name: attr.name.clone(),
                value: attr.value.to_string(),
                visible: attr.visible,
            })
            .collect(),
        chain: node.chain.iter().map(node_view).collect(),
    }
}

fn count_hidden(view: &NodeView) -> usize {
    view.attributes.iter().filter(|a| !a.visible).count()
        + view.chain.iter().map(count_hidden).sum::<usize>()
}
