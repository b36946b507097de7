//! Placeholder bindings collected during one match

use std::collections::HashMap;

/// Concrete values seen for each placeholder.
///
/// Bindings only grow. A placeholder with at least one value admits only
/// those values from then on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceholderBindings {
    values: HashMap<String, Vec<String>>,
}

impl PlaceholderBindings {
    /// No bindings yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `value` to `placeholder`; repeated values are kept once
    pub fn bind(&mut self, placeholder: &str, value: &str) {
        let values = self.values.entry(placeholder.to_string()).or_default();
        if !values.iter().any(|v| v == value) {
            values.push(value.to_string());
        }
    }

    /// Values bound to `placeholder`, in binding order
    pub fn get(&self, placeholder: &str) -> &[String] {
        self.values.get(placeholder).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether `placeholder` has at least one value
    pub fn is_bound(&self, placeholder: &str) -> bool {
        !self.get(placeholder).is_empty()
    }

    /// Whether `value` may fill `placeholder`: it is still free or already holds `value`
    pub fn admits(&self, placeholder: &str, value: &str) -> bool {
        let bound = self.get(placeholder);
        bound.is_empty() || bound.iter().any(|v| v == value)
    }

    /// Number of bound placeholders
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing is bound
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over `(placeholder, values)` in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}
