use crate::cfg::{Section, leading_int};
use crate::diagnostics;
use crate::metadata::Metadata;
use crate::model::layer::{self, GRAPH_INPUT, LayerBuilder};
use crate::model::node::Node;
use crate::model::parameter::{Argument, Parameter};
use crate::model::tensor::{TensorShape, TensorType};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Graph {
    pub inputs: Vec<Parameter>,
    pub outputs: Vec<Parameter>,
    pub nodes: Vec<Node>,
}

impl Graph {
    /// Build the graph from cfg sections. The first section is the `[net]`
    /// header; it only contributes the input shape.
    pub fn new(metadata: &Metadata, sections: Vec<Section>) -> Self {
        let mut sections = sections.into_iter();
        let input_type = sections.next().as_ref().and_then(input_type);

        let inputs = vec![Parameter::new(
            GRAPH_INPUT,
            vec![Argument::typed(GRAPH_INPUT, input_type)],
        )];

        let mut layers: Vec<LayerBuilder> = sections
            .enumerate()
            .map(|(index, section)| LayerBuilder::new(index, section))
            .collect();
        layer::resolve(&mut layers);

        let outputs = layers
            .last()
            .map(|last| {
                last.outputs
                    .iter()
                    .enumerate()
                    .map(|(i, id)| Parameter::new(output_name(i), vec![Argument::new(id.clone())]))
                    .collect()
            })
            .unwrap_or_default();

        let nodes = layers
            .into_iter()
            .map(|layer| layer.into_node(metadata))
            .collect();

        Self {
            inputs,
            outputs,
            nodes,
        }
    }

    /// Top-level nodes plus everything chained beneath them.
    pub fn node_count(&self) -> usize {
        fn count(node: &Node) -> usize {
            1 + node.chain.iter().map(count).sum::<usize>()
        }
        self.nodes.iter().map(count).sum()
    }
}

/// `output`, `output`, `output2`, `output3`, ...
fn output_name(index: usize) -> String {
    if index > 1 {
        format!("output{index}")
    } else {
        "output".to_string()
    }
}

fn input_type(net: &Section) -> Option<TensorType> {
    let (width, height, channels) = (
        net.get("width")?,
        net.get("height")?,
        net.get("channels")?,
    );

    let mut dims = Vec::with_capacity(3);
    for (key, raw) in [("width", width), ("height", height), ("channels", channels)] {
        match leading_int(raw) {
            Some(dim) => dims.push(dim),
            None => {
                diagnostics::warn(format!("[{}] {key}={raw:?} is not an integer", net.kind));
                return None;
            }
        }
    }

    Some(TensorType::new("float32", TensorShape::new(dims)))
}
