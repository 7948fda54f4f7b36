//! Dependency resolution between layer sections.
//!
//! Every layer produces one output named after its position. By default a
//! layer consumes its predecessor's output (the graph input for layer 0);
//! `shortcut` adds a relative back-reference and `route` replaces the inputs
//! with a list of relative or absolute references. References that point
//! outside the network are dropped.

use crate::cfg::{Section, leading_int};
use crate::metadata::Metadata;
use crate::model::node::Node;

pub const GRAPH_INPUT: &str = "input";

/// A section while its edges are being resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerBuilder {
    pub index: usize,
    pub section: Section,
    /// `shortcut` source offset, taken out of the section.
    pub from: Option<String>,
    /// `route` source list, taken out of the section.
    pub layers: Option<String>,
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
}

impl LayerBuilder {
    pub fn new(index: usize, mut section: Section) -> Self {
        let (from, layers) = match section.kind.as_str() {
            "shortcut" => (section.remove("from"), None),
            "route" => (None, section.remove("layers")),
            _ => (None, None),
        };

        Self {
            index,
            section,
            from,
            layers,
            inputs: Vec::new(),
            outputs: vec![index.to_string()],
        }
    }

    pub fn into_node(self, metadata: &Metadata) -> Node {
        Node::new(
            metadata,
            self.section,
            self.inputs,
            self.outputs,
            self.index.to_string(),
        )
    }
}

/// Fill in `inputs` for every layer, in index order.
pub fn resolve(layers: &mut [LayerBuilder]) {
    for index in 0..layers.len() {
        let mut inputs = match index {
            0 => vec![GRAPH_INPUT.to_string()],
            _ => layers[index - 1].outputs.clone(),
        };

        let layer = &layers[index];
        match layer.section.kind.as_str() {
            "shortcut" => {
                let source = layer
                    .from
                    .as_deref()
                    .and_then(leading_int)
                    .and_then(|offset| relative(index, offset));
                match source.and_then(|source| first_output(layers, source)) {
                    Some(output) => inputs.push(output),
                    None => log::debug!(
                        "layer {index}: shortcut from={:?} does not resolve",
                        layer.from
                    ),
                }
            }
            "route" => {
                inputs.clear();
                for entry in layer.layers.as_deref().unwrap_or_default().split(',') {
                    let source = leading_int(entry).and_then(|offset| {
                        if offset < 0 {
                            relative(index, offset)
                        } else {
                            usize::try_from(offset).ok()
                        }
                    });
                    match source.and_then(|source| first_output(layers, source)) {
                        Some(output) => inputs.push(output),
                        None => log::debug!(
                            "layer {index}: route entry {:?} does not resolve",
                            entry.trim()
                        ),
                    }
                }
            }
            _ => {}
        }

        layers[index].inputs = inputs;
    }
}

fn relative(index: usize, offset: i64) -> Option<usize> {
    let index = i64::try_from(index).ok()?;
    usize::try_from(index.checked_add(offset)?).ok()
}

fn first_output(layers: &[LayerBuilder], index: usize) -> Option<String> {
    layers.get(index)?.outputs.first().cloned()
}
