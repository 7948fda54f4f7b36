//! Operator metadata (darknet-metadata.json): display category plus
//! per-attribute type, default and visibility.
//!
//! JSON shape:
//! [
//!   {
//!     "name": "convolutional",
//!     "schema": {
//!       "category": "Layer",
//!       "attributes": [
//!         { "name": "filters", "type": "int32", "default": 1 },
//!         { "name": "flipped", "type": "boolean", "default": false, "visible": false }
//!       ]
//!     }
//!   }
//! ]
//!
//! A missing or unreadable document is not an error: lookups then simply find
//! nothing, and every attribute is shown as-is.

use crate::diagnostics;
use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

const BUNDLED: &str = include_str!("../../resources/darknet-metadata.json");

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Schema {
    #[serde(default)]
    pub category: Option<String>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub attributes: Vec<AttributeSchema>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AttributeSchema {
    #[serde(default)]
    pub name: String,

    #[serde(default, rename = "type")]
    pub kind: Option<String>,

    #[serde(default)]
    pub default: Option<serde_json::Value>,

    #[serde(default)]
    pub visible: Option<bool>,
}

impl AttributeSchema {
    pub fn is_boolean(&self) -> bool {
        self.kind.as_deref() == Some("boolean")
    }

    pub fn is_hidden(&self) -> bool {
        self.visible == Some(false)
    }
}

/// Raw entry as it appears in the document.
#[derive(Debug, Deserialize)]
struct RawEntry {
    #[serde(default)]
    name: String,

    #[serde(default)]
    schema: Option<Schema>,
}

/// Read-only schema lookup, built once and shared by reference.
#[derive(Debug, Clone, Default)]
pub struct Metadata {
    schemas: HashMap<String, Schema>,
    // operator -> attribute name -> position in `Schema::attributes`
    attributes: HashMap<String, HashMap<String, usize>>,
}

impl Metadata {
    /// File name the host looks for when no explicit path is given.
    pub const FILE_NAME: &'static str = "darknet-metadata.json";

    /// A lookup that knows no operators.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let entries: Option<Vec<RawEntry>> = serde_json::from_str(text)?;

        let mut schemas = HashMap::new();
        for entry in entries.unwrap_or_default() {
            let Some(schema) = entry.schema else {
                continue;
            };
            if !entry.name.is_empty() {
                schemas.insert(entry.name, schema);
            }
        }

        let attributes = schemas
            .iter()
            .map(|(operator, schema)| {
                let index = schema
                    .attributes
                    .iter()
                    .enumerate()
                    .filter(|(_, attr)| !attr.name.is_empty())
                    .map(|(i, attr)| (attr.name.clone(), i))
                    .collect();
                (operator.clone(), index)
            })
            .collect();

        Ok(Self {
            schemas,
            attributes,
        })
    }

    /// Load a metadata document, degrading to [`Metadata::empty`] on any failure.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                diagnostics::warn(format!(
                    "metadata {} unavailable ({err}); attributes will not be annotated",
                    path.display()
                ));
                return Self::empty();
            }
        };

        match Self::from_json(&text) {
            Ok(metadata) => {
                log::debug!(
                    "loaded {} operator schemas from {}",
                    metadata.len(),
                    path.display()
                );
                metadata
            }
            Err(err) => {
                diagnostics::warn(format!(
                    "metadata {} is not valid ({err}); attributes will not be annotated",
                    path.display()
                ));
                Self::empty()
            }
        }
    }

    /// The schema set shipped with the crate.
    pub fn bundled() -> Self {
        Self::from_json(BUNDLED).unwrap_or_else(|err| {
            diagnostics::warn(format!("bundled metadata is not valid: {err}"));
            Self::empty()
        })
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    pub fn schema(&self, operator: &str) -> Option<&Schema> {
        self.schemas.get(operator)
    }

    pub fn attribute_schema(&self, operator: &str, name: &str) -> Option<&AttributeSchema> {
        let index = *self.attributes.get(operator)?.get(name)?;
        self.schemas.get(operator)?.attributes.get(index)
    }

    /// Display category for an operator, empty when unknown.
    pub fn category(&self, operator: &str) -> String {
        self.schema(operator)
            .and_then(|schema| schema.category.clone())
            .unwrap_or_default()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<AttributeSchema>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<AttributeSchema>>::deserialize(deserializer)?.unwrap_or_default())
}
