use crate::error::{Result, ScopeError};
use crate::model::{CategoryId, Entry};
use crate::preview::PreviewWidget;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Grid of small cards showing title, subtitle and art.
pub const CATEGORY_TEMPLATE: &str = r#"{
    "schema-version": 1,
    "template": {
        "category-layout": "grid",
        "collapsed-rows": 0,
        "card-size": "small"
    },
    "components" : {
        "title": "title",
        "subtitle": "subtitle",
        "art": {
            "field": "art",
            "aspect-ratio": 1.13
        }
    }
}"#;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CategoryDef {
    pub id: CategoryId,
    pub title: String,
    pub icon: String,
    pub template: &'static str,
}

impl CategoryDef {
    pub fn new(id: CategoryId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            icon: String::new(),
            template: CATEGORY_TEMPLATE,
        }
    }
}

/// One result pushed into a registered category.
///
/// `app` carries the full entry so a later preview request can rebuild it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CategorisedResult {
    pub category: CategoryId,
    pub uri: String,
    pub title: String,
    pub art: String,
    pub app: Entry,
    pub intercept_activation: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
}

impl CategorisedResult {
    pub fn new(category: CategoryId, entry: &Entry) -> Self {
        Self {
            category,
            uri: entry.activation_target.clone(),
            title: entry.display_title.clone(),
            art: entry.icon_reference.clone(),
            app: entry.clone(),
            intercept_activation: true,
            subtitle: None,
        }
    }

    pub fn with_subtitle(mut self, subtitle: &str) -> Self {
        self.subtitle = Some(subtitle.to_string());
        self
    }
}

/// The host side of a search request.
pub trait SearchReply {
    fn register_category(&mut self, category: CategoryDef) -> Result<()>;
    fn push(&mut self, result: CategorisedResult) -> Result<()>;
}

/// The host side of a preview request.
pub trait PreviewReply {
    fn push_widgets(&mut self, widgets: Vec<PreviewWidget>) -> Result<()>;
}

#[derive(Serialize)]
#[serde(tag = "event", rename_all = "lowercase")]
enum HostEvent<'a> {
    Category(&'a CategoryDef),
    Result(&'a CategorisedResult),
}

/// Writes every registration and push as one JSON line.
pub struct JsonLinesReply<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesReply<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line<T: Serialize>(&mut self, value: &T) -> std::io::Result<()> {
        serde_json::to_writer(&mut self.out, value)?;
        self.out.write_all(b"\n")?;
        self.out.flush()
    }
}

impl<W: Write> SearchReply for JsonLinesReply<W> {
    fn register_category(&mut self, category: CategoryDef) -> Result<()> {
        self.write_line(&HostEvent::Category(&category))
            .map_err(|e| ScopeError::Emit(e.to_string()))
    }

    fn push(&mut self, result: CategorisedResult) -> Result<()> {
        self.write_line(&HostEvent::Result(&result))
            .map_err(|e| ScopeError::Emit(e.to_string()))
    }
}

impl<W: Write> PreviewReply for JsonLinesReply<W> {
    fn push_widgets(&mut self, widgets: Vec<PreviewWidget>) -> Result<()> {
        self.write_line(&widgets)
            .map_err(|e| ScopeError::Preview(e.to_string()))
    }
}
