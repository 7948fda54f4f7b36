//! Tensor placeholders. Weight data is never loaded; tensors only carry a name
//! and an (often unknown) type for display.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TensorShape {
    pub dimensions: Option<Vec<i64>>,
}

impl TensorShape {
    pub fn new(dimensions: Vec<i64>) -> Self {
        Self {
            dimensions: Some(dimensions),
        }
    }

    pub fn unknown() -> Self {
        Self { dimensions: None }
    }
}

impl fmt::Display for TensorShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.dimensions {
            Some(dims) if !dims.is_empty() => {
                let dims: Vec<String> = dims.iter().map(i64::to_string).collect();
                write!(f, "[{}]", dims.join(","))
            }
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TensorType {
    pub data_type: String,
    pub shape: TensorShape,
}

impl TensorType {
    pub fn new(data_type: impl Into<String>, shape: TensorShape) -> Self {
        Self {
            data_type: data_type.into(),
            shape,
        }
    }

    /// `?` with no shape.
    pub fn unknown() -> Self {
        Self::new("?", TensorShape::unknown())
    }
}

impl fmt::Display for TensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data_type = if self.data_type.is_empty() {
            "?"
        } else {
            self.data_type.as_str()
        };
        write!(f, "{}{}", data_type, self.shape)
    }
}

/// Uninitialized weight tensor, e.g. `3_weights`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tensor {
    pub name: String,
    #[serde(rename = "type")]
    pub tensor_type: TensorType,
}

impl Tensor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tensor_type: TensorType::unknown(),
        }
    }

    pub fn state(&self) -> &'static str {
        "Tensor data not implemented."
    }

    pub fn value(&self) -> Option<&[u8]> {
        None
    }
}

impl fmt::Display for Tensor {
    fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Ok(())
    }
}
