use crate::cfg::Section;
use crate::metadata::Metadata;
use crate::model::attribute::Attribute;
use crate::model::expand;
use crate::model::parameter::{Argument, Parameter};
use crate::model::tensor::Tensor;
use serde::Serialize;

/// One layer of the network, plus the auxiliary operators folded into it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub name: String,
    pub operator: String,
    pub category: String,
    pub attributes: Vec<Attribute>,
    pub inputs: Vec<Parameter>,
    pub outputs: Vec<Parameter>,
    /// Batch normalization / activation split off this node, in order.
    pub chain: Vec<Node>,
}

impl Node {
    /// Build a node from a section whose edges are already resolved.
    ///
    /// `from`/`layers` must already be gone from `section`; every remaining
    /// attribute that is not consumed by expansion is emitted.
    pub fn new(
        metadata: &Metadata,
        mut section: Section,
        inputs: Vec<String>,
        outputs: Vec<String>,
        name: impl Into<String>,
    ) -> Self {
        let operator = std::mem::take(&mut section.kind);
        let mut node = Node {
            name: name.into(),
            category: metadata.category(&operator),
            operator,
            attributes: Vec::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            chain: Vec::new(),
        };

        if let Some(param) = edge_parameter("input", "inputs", inputs) {
            node.inputs.push(param);
        }
        if let Some(param) = edge_parameter("output", "outputs", outputs) {
            node.outputs.push(param);
        }

        let policy = expand::policy(&node.operator);
        for name in policy.initializers {
            node.push_initializer(name);
        }
        if policy.batch_normalize {
            node.expand_batch_normalize(metadata, &mut section);
        }
        if let Some(default) = policy.activation {
            node.expand_activation(metadata, &mut section, default);
        }

        let attributes = section
            .attributes
            .iter()
            .map(|(key, value)| Attribute::new(metadata, &node.operator, key.as_str(), value))
            .collect();
        node.attributes = attributes;
        node
    }

    pub fn documentation(&self) -> &str {
        ""
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attr| attr.name == name)
    }

    pub fn input(&self, name: &str) -> Option<&Parameter> {
        self.inputs.iter().find(|param| param.name == name)
    }

    /// Ids feeding this node from other nodes or the graph input.
    pub fn edge_inputs(&self) -> Vec<&str> {
        self.inputs
            .iter()
            .filter(|param| param.name == "input" || param.name == "inputs")
            .flat_map(Parameter::ids)
            .collect()
    }

    pub fn edge_outputs(&self) -> Vec<&str> {
        self.outputs.iter().flat_map(Parameter::ids).collect()
    }

    fn push_initializer(&mut self, name: &str) {
        let id = format!("{}_{}", self.name, name);
        self.inputs
            .push(Parameter::new(name, vec![Argument::initializer(Tensor::new(id))]));
    }

    fn expand_batch_normalize(&mut self, metadata: &Metadata, section: &mut Section) {
        if section.get("batch_normalize") != Some("1") {
            return;
        }
        section.remove("batch_normalize");
        self.push_chain(metadata, "batch_normalize", "batch_normalize");
    }

    fn expand_activation(&mut self, metadata: &Metadata, section: &mut Section, default: &str) {
        let activation = match section.get("activation") {
            Some(activation) if !activation.is_empty() && activation != default => {
                activation.to_string()
            }
            _ => return,
        };
        section.remove("activation");
        self.push_chain(metadata, activation, "activation");
    }

    fn push_chain(&mut self, metadata: &Metadata, operator: impl Into<String>, suffix: &str) {
        let name = format!("{}:{}", self.name, suffix);
        self.chain.push(Node::new(
            metadata,
            Section::new(operator),
            Vec::new(),
            Vec::new(),
            name,
        ));
    }
}

fn edge_parameter(single: &str, plural: &str, ids: Vec<String>) -> Option<Parameter> {
    let name = match ids.len() {
        0 => return None,
        1 => single,
        _ => plural,
    };
    Some(Parameter::new(
        name,
        ids.into_iter().map(Argument::new).collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::attribute::AttributeValue;
    use pretty_assertions::assert_eq;

    fn node(section: Section, inputs: &[&str]) -> Node {
        Node::new(
            &Metadata::empty(),
            section,
            inputs.iter().map(|s| s.to_string()).collect(),
            vec!["4".to_string()],
            "4",
        )
    }

    fn param_names(params: &[Parameter]) -> Vec<&str> {
        params.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn convolution_splits_into_chain() {
        let section = Section::new("convolutional")
            .with("batch_normalize", "1")
            .with("filters", "32")
            .with("activation", "leaky");
        let node = node(section, &["3"]);

        assert_eq!(param_names(&node.inputs), vec!["input", "biases", "weights"]);
        assert_eq!(node.input("weights").unwrap().ids(), vec!["4_weights"]);

        let chain: Vec<_> = node
            .chain
            .iter()
            .map(|n| (n.name.as_str(), n.operator.as_str()))
            .collect();
        assert_eq!(
            chain,
            vec![
                ("4:batch_normalize", "batch_normalize"),
                ("4:activation", "leaky")
            ]
        );

        let names: Vec<_> = node.attributes.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["filters"]);
    }

    #[test]
    fn batch_normalize_chain_carries_statistics() {
        let node = node(
            Section::new("convolutional").with("batch_normalize", "1"),
            &["3"],
        );
        let bn = &node.chain[0];

        assert_eq!(param_names(&bn.inputs), vec!["scale", "mean", "variance"]);
        assert_eq!(
            bn.input("scale").unwrap().ids(),
            vec!["4:batch_normalize_scale"]
        );
        assert!(bn.outputs.is_empty());
        assert!(bn.attributes.is_empty());
    }

    #[test]
    fn batch_normalize_zero_stays_an_attribute() {
        let node = node(
            Section::new("convolutional").with("batch_normalize", "0"),
            &["3"],
        );
        assert!(node.chain.is_empty());
        assert_eq!(
            node.attribute("batch_normalize").unwrap().value,
            AttributeValue::Int(0)
        );
    }

    #[test]
    fn default_activation_is_not_split() {
        let node = node(
            Section::new("convolutional").with("activation", "logistic"),
            &["3"],
        );
        assert!(node.chain.is_empty());
        assert!(node.attribute("activation").is_some());
    }

    #[test]
    fn shortcut_uses_linear_default() {
        let linear = node(Section::new("shortcut").with("activation", "linear"), &["3", "1"]);
        assert!(linear.chain.is_empty());
        assert_eq!(param_names(&linear.inputs), vec!["inputs"]);
        assert_eq!(linear.edge_inputs(), vec!["3", "1"]);

        let leaky = node(Section::new("shortcut").with("activation", "leaky"), &["3", "1"]);
        assert_eq!(leaky.chain[0].operator, "leaky");
    }

    #[test]
    fn gru_ignores_activation() {
        let node = node(
            Section::new("gru")
                .with("batch_normalize", "1")
                .with("activation", "tanh"),
            &["3"],
        );
        assert_eq!(node.chain.len(), 1);
        assert!(node.attribute("activation").is_some());
    }

    #[test]
    fn other_operators_keep_all_attributes() {
        let node = node(
            Section::new("maxpool")
                .with("size", "2")
                .with("activation", "relu"),
            &["3"],
        );
        assert!(node.chain.is_empty());
        assert_eq!(param_names(&node.inputs), vec!["input"]);
        assert_eq!(node.attributes.len(), 2);
    }

    #[test]
    fn no_edges_means_no_parameters() {
        let node = Node::new(&Metadata::empty(), Section::new("relu"), vec![], vec![], "x");
        assert!(node.inputs.is_empty());
        assert!(node.outputs.is_empty());
        assert_eq!(node.documentation(), "");
    }

    #[test]
    fn category_comes_from_schema() {
        let metadata = Metadata::from_json(
            r#"[{ "name": "leaky", "schema": { "category": "Activation" } }]"#,
        )
        .unwrap();
        let node = Node::new(
            &metadata,
            Section::new("convolutional").with("activation", "leaky"),
            vec!["input".to_string()],
            vec!["0".to_string()],
            "0",
        );
        assert_eq!(node.category, "");
        assert_eq!(node.chain[0].category, "Activation");
    }
}
