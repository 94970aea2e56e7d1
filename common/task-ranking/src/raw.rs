//! Raw task records as returned by the workspace database query
//!
//! Pages carry a free-form map of named properties. Each property is decoded
//! into a [`PropertyValue`] keyed on its declared `type`; kinds the ranker has
//! no use for (and values that fail to decode) collapse into
//! [`PropertyValue::Other`] so a single odd column never rejects the page.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// A single page from the task database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTask {
    /// Page identifier (dashed UUID form)
    pub id: String,
    /// Public page URL
    #[serde(default)]
    pub url: Option<String>,
    /// Properties keyed by their (user-chosen) column name
    #[serde(default, deserialize_with = "lenient_properties")]
    pub properties: BTreeMap<String, PropertyValue>,
}

/// A run of text inside a title or rich text property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichText {
    #[serde(default)]
    pub plain_text: String,
}

/// The selected option of a select or status property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// The value of a date property
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DateValue {
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

/// Property value, tagged by the property's declared type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyValue {
    Title {
        #[serde(default)]
        title: Vec<RichText>,
    },
    RichText {
        #[serde(default)]
        rich_text: Vec<RichText>,
    },
    Checkbox {
        #[serde(default)]
        checkbox: bool,
    },
    Select {
        #[serde(default)]
        select: Option<SelectOption>,
    },
    /// Notion's built-in status column; read the same way as a select
    Status {
        #[serde(default)]
        status: Option<SelectOption>,
    },
    Date {
        #[serde(default)]
        date: Option<DateValue>,
    },
    #[serde(other)]
    Other,
}

impl PropertyValue {
    /// Title property made of a single text run
    pub fn title(text: impl Into<String>) -> Self {
        PropertyValue::Title {
            title: vec![RichText {
                plain_text: text.into(),
            }],
        }
    }

    /// Select property with the given option selected
    pub fn select(name: impl Into<String>) -> Self {
        PropertyValue::Select {
            select: Some(SelectOption {
                name: name.into(),
                color: None,
            }),
        }
    }

    /// Date property with only a start value
    pub fn date(start: impl Into<String>) -> Self {
        PropertyValue::Date {
            date: Some(DateValue {
                start: Some(start.into()),
                ..Default::default()
            }),
        }
    }

    pub fn checkbox(checked: bool) -> Self {
        PropertyValue::Checkbox { checkbox: checked }
    }

    /// Concatenated text of a title property, `None` for any other kind
    pub fn title_text(&self) -> Option<String> {
        match self {
            PropertyValue::Title { title } => {
                Some(title.iter().map(|t| t.plain_text.as_str()).collect())
            }
            _ => None,
        }
    }

    /// Selected option name of a select or status property
    pub fn selected_name(&self) -> Option<&str> {
        match self {
            PropertyValue::Select { select: Some(opt) }
            | PropertyValue::Status { status: Some(opt) } => Some(opt.name.as_str()),
            _ => None,
        }
    }

    /// Raw start value of a date property
    pub fn date_start(&self) -> Option<&str> {
        match self {
            PropertyValue::Date { date: Some(date) } => date.start.as_deref(),
            _ => None,
        }
    }
}

impl RawTask {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: None,
            properties: BTreeMap::new(),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_property(mut self, name: impl Into<String>, value: PropertyValue) -> Self {
        self.properties.insert(name.into(), value);
        self
    }

    /// Look up a property by column name
    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    /// The first title-typed property, whatever its column is called
    pub fn title_property(&self) -> Option<&PropertyValue> {
        self.properties
            .values()
            .find(|p| matches!(p, PropertyValue::Title { .. }))
    }
}

fn lenient_properties<'de, D>(deserializer: D) -> Result<BTreeMap<String, PropertyValue>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<String, serde_json::Value>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(name, value)| {
            let parsed = serde_json::from_value(value).unwrap_or_else(|e| {
                tracing::debug!("Ignoring undecodable property '{}': {}", name, e);
                PropertyValue::Other
            });
            (name, parsed)
        })
        .collect())
}
