//! Tool (function) specifications
//!
//! The serialized form of these types is derived from their fields alone.
//! Accessors are plain methods and never add, rename or hide JSON properties,
//! so every field is always present in the output, `null` when unset.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// JSON schema of a tool's arguments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolParameters {
    #[serde(rename = "type")]
    kind: String,
    properties: BTreeMap<String, Value>,
    required: Vec<String>,
}

impl Default for ToolParameters {
    fn default() -> Self {
        Self {
            kind: "object".to_string(),
            properties: BTreeMap::new(),
            required: Vec::new(),
        }
    }
}

impl ToolParameters {
    /// Add an optional property described by a JSON schema fragment
    pub fn property(mut self, name: impl Into<String>, schema: Value) -> Self {
        self.properties.insert(name.into(), schema);
        self
    }

    /// Add a property and mark it required
    pub fn required_property(mut self, name: impl Into<String>, schema: Value) -> Self {
        let name = name.into();
        self.properties.insert(name.clone(), schema);
        if !self.required.contains(&name) {
            self.required.push(name);
        }
        self
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn properties(&self) -> &BTreeMap<String, Value> {
        &self.properties
    }

    pub fn required(&self) -> &[String] {
        &self.required
    }
}

/// A callable function the model may ask to invoke
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolSpecification {
    name: Option<String>,
    description: Option<String>,
    parameters: Option<ToolParameters>,
}

impl ToolSpecification {
    pub fn builder() -> ToolSpecificationBuilder {
        ToolSpecificationBuilder::default()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn parameters(&self) -> Option<&ToolParameters> {
        self.parameters.as_ref()
    }
}

#[derive(Debug, Default)]
pub struct ToolSpecificationBuilder {
    inner: ToolSpecification,
}

impl ToolSpecificationBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.inner.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.inner.description = Some(description.into());
        self
    }

    pub fn parameters(mut self, parameters: ToolParameters) -> Self {
        self.inner.parameters = Some(parameters);
        self
    }

    pub fn build(self) -> ToolSpecification {
        self.inner
    }
}

/// Request-side wrapper used by function-calling chat APIs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    #[serde(rename = "type")]
    kind: String,
    function: ToolSpecification,
}

impl Tool {
    pub fn function(function: ToolSpecification) -> Self {
        Self {
            kind: "function".to_string(),
            function,
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn specification(&self) -> &ToolSpecification {
        &self.function
    }
}
