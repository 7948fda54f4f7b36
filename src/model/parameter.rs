use crate::model::tensor::{Tensor, TensorType};
use serde::Serialize;

/// Named group of arguments on a node or graph boundary (`input`, `weights`, ...).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    pub name: String,
    pub visible: bool,
    pub arguments: Vec<Argument>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, arguments: Vec<Argument>) -> Self {
        Self {
            name: name.into(),
            visible: true,
            arguments,
        }
    }

    /// Argument ids, in order.
    pub fn ids(&self) -> Vec<&str> {
        self.arguments.iter().map(|arg| arg.id.as_str()).collect()
    }
}

/// Edge endpoint: either a graph input (`input`), a producing node index, or a
/// weight placeholder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Argument {
    pub id: String,
    #[serde(rename = "type")]
    pub declared_type: Option<TensorType>,
    pub initializer: Option<Tensor>,
}

impl Argument {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            declared_type: None,
            initializer: None,
        }
    }

    pub fn typed(id: impl Into<String>, declared_type: Option<TensorType>) -> Self {
        Self {
            declared_type,
            ..Self::new(id)
        }
    }

    pub fn initializer(tensor: Tensor) -> Self {
        Self {
            id: tensor.name.clone(),
            declared_type: None,
            initializer: Some(tensor),
        }
    }

    /// The initializer's type wins over the declared one.
    pub fn tensor_type(&self) -> Option<&TensorType> {
        match &self.initializer {
            Some(tensor) => Some(&tensor.tensor_type),
            None => self.declared_type.as_ref(),
        }
    }
}
