use crate::model::Entry;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ActionInfo {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub icon: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub uri: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PreviewWidget {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub attributes: Map<String, Value>,
}

impl PreviewWidget {
    pub fn new(id: &str, kind: &str) -> Self {
        Self {
            id: id.to_string(),
            kind: kind.to_string(),
            attributes: Map::new(),
        }
    }

    pub fn with_attribute(mut self, key: &str, value: Value) -> Self {
        self.attributes.insert(key.to_string(), value);
        self
    }
}

/// Header, icon, comment and a single launch action for one entry.
pub fn widgets_for(entry: &Entry) -> Vec<PreviewWidget> {
    let launch = ActionInfo {
        id: "launch".to_string(),
        label: "Launch".to_string(),
        icon: String::new(),
        uri: entry.activation_target.clone(),
    };

    vec![
        PreviewWidget::new("header", "header").with_attribute("title", json!(entry.display_title)),
        PreviewWidget::new("art", "image").with_attribute("source", json!(entry.icon_reference)),
        PreviewWidget::new("content", "text").with_attribute("text", json!(entry.subtitle)),
        PreviewWidget::new("actions", "actions").with_attribute("actions", json!([launch])),
    ]
}
