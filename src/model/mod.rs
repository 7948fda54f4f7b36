//! Read-only computation graph built from cfg sections.

pub mod attribute;
pub mod expand;
pub mod graph;
pub mod layer;
pub mod node;
pub mod parameter;
pub mod tensor;

pub use attribute::{Attribute, AttributeValue};
pub use graph::Graph;
pub use node::Node;
pub use parameter::{Argument, Parameter};
pub use tensor::{Tensor, TensorShape, TensorType};

use crate::cfg::Section;
use crate::metadata::Metadata;
use serde::Serialize;

pub const FORMAT: &str = "Darknet";

/// A loaded cfg document. Darknet files always describe exactly one graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Model {
    format: &'static str,
    graphs: Vec<Graph>,
}

impl Model {
    pub fn new(metadata: &Metadata, sections: Vec<Section>) -> Self {
        Self {
            format: FORMAT,
            graphs: vec![Graph::new(metadata, sections)],
        }
    }

    pub fn format(&self) -> &str {
        self.format
    }

    pub fn graphs(&self) -> &[Graph] {
        &self.graphs
    }
}
