use indexmap::IndexMap;

/// One bracketed block of a cfg file, e.g. `[convolutional]`.
///
/// Attributes keep file order; assigning an existing key replaces the value in
/// place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    pub kind: String,
    pub attributes: IndexMap<String, String>,
}

impl Section {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            attributes: IndexMap::new(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Remove an attribute, keeping the order of the remaining ones.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.attributes.shift_remove(key)
    }

    pub fn is_tagged(&self) -> bool {
        !self.kind.is_empty()
    }
}
