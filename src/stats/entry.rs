//! Render-ready status entries.

use serde::Serialize;
use std::collections::BTreeMap;

/// Semantic color of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatColor {
    Neutral,
    Warning,
    Danger,
    Success,
}

/// One labelled value on the status panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatEntry {
    pub label: String,
    pub value: String,
    pub color: StatColor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub icon: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra_attributes: BTreeMap<String, String>,
}

impl StatEntry {
    /// A neutral entry with no description.
    pub fn new(label: impl Into<String>, value: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            color: StatColor::Neutral,
            description: None,
            icon: icon.into(),
            extra_attributes: BTreeMap::new(),
        }
    }

    pub fn with_color(mut self, color: StatColor) -> Self {
        self.color = color;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_attributes.insert(key.into(), value.into());
        self
    }
}
