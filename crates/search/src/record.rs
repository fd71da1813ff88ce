//! Searchable listing records.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;

/// Value of one field as seen by the scorer.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    /// Single text value
    Text(Cow<'a, str>),
    /// Ordered list of text values
    List(Vec<Cow<'a, str>>),
}

/// A listing to be ranked: accommodation, guide, artisan, event.
///
/// Declared fields cover the primary and alternate-language text the engine
/// always understands. Anything else the caller attaches (`type`, `price`,
/// nested partner data) lives in `attributes` and is reached through
/// [`SearchableRecord::field`] by name or dotted path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchableRecord {
    /// Caller-assigned unique identifier
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_alt: Option<String>,
    #[serde(
        default,
        deserialize_with = "coerced_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub tags: Option<Vec<String>>,
    #[serde(
        default,
        deserialize_with = "coerced_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub tags_alt: Option<Vec<String>>,
    /// Opaque extra attributes
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl SearchableRecord {
    /// Creates a record with only an id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_title_alt(mut self, title: impl Into<String>) -> Self {
        self.title_alt = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_description_alt(mut self, description: impl Into<String>) -> Self {
        self.description_alt = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    #[must_use]
    pub fn with_location_alt(mut self, location: impl Into<String>) -> Self {
        self.location_alt = Some(location.into());
        self
    }

    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_tags_alt<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags_alt = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Attach an extra attribute such as `type` or `price`.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Look up a field by wire name or dotted attribute path.
    ///
    /// Declared fields answer to `title`, `titleAlt`, `description`,
    /// `descriptionAlt`, `location`, `locationAlt`, `tags` and `tagsAlt`.
    /// Other names walk `attributes`, splitting on `.` for nested objects.
    /// Numbers and booleans are coerced to text; arrays become lists with
    /// null elements dropped; nulls, objects and empty strings are absent.
    pub fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => text(&self.id),
            "title" => self.title.as_deref().and_then(text),
            "titleAlt" => self.title_alt.as_deref().and_then(text),
            "description" => self.description.as_deref().and_then(text),
            "descriptionAlt" => self.description_alt.as_deref().and_then(text),
            "location" => self.location.as_deref().and_then(text),
            "locationAlt" => self.location_alt.as_deref().and_then(text),
            "tags" => self.tags.as_deref().map(list),
            "tagsAlt" => self.tags_alt.as_deref().map(list),
            path => self.attribute(path).and_then(value_to_field),
        }
    }

    /// Raw attribute by name or dotted path.
    pub fn attribute(&self, path: &str) -> Option<&Value> {
        if let Some(value) = self.attributes.get(path) {
            return Some(value);
        }

        let mut segments = path.split('.');
        let first = self.attributes.get(segments.next()?)?;
        segments.try_fold(first, |value, segment| value.as_object()?.get(segment))
    }

    /// The `type` attribute, if it is a string.
    pub fn kind(&self) -> Option<&str> {
        self.attribute("type").and_then(Value::as_str)
    }

    /// The `price` attribute, if it is numeric.
    pub fn price(&self) -> Option<f64> {
        self.attribute("price").and_then(Value::as_f64)
    }
}

fn text(value: &str) -> Option<FieldValue<'_>> {
    (!value.is_empty()).then(|| FieldValue::Text(Cow::Borrowed(value)))
}

fn list(values: &[String]) -> FieldValue<'_> {
    FieldValue::List(values.iter().map(|v| Cow::Borrowed(v.as_str())).collect())
}

fn scalar_to_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(b) => Some(Cow::Owned(b.to_string())),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Declared list fields accept any scalar element; numbers and booleans are
/// kept as their text form, nulls and nested values are dropped.
fn coerced_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = Option::<Vec<Value>>::deserialize(deserializer)?;
    Ok(items.map(|items| {
        items
            .iter()
            .filter_map(scalar_to_text)
            .map(Cow::into_owned)
            .collect()
    }))
}

fn value_to_field(value: &Value) -> Option<FieldValue<'_>> {
    match value {
        Value::Array(items) => Some(FieldValue::List(
            items.iter().filter_map(scalar_to_text).collect(),
        )),
        other => scalar_to_text(other)
            .filter(|s| !s.is_empty())
            .map(FieldValue::Text),
    }
}
