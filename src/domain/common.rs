use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::domain::record::RecordType;

/// Identifier of a stored record or widget.
///
/// New entities get a random UUID. Data exported by earlier versions carries
/// integer store keys or millisecond timestamps, so any string or integer is
/// accepted and kept as text. An empty id means "not saved yet".
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_unset(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self(value.trim().to_string())
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<i64> for EntityId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Integer(i64),
            Text(String),
        }

        Ok(match Option::<Raw>::deserialize(deserializer)? {
            None => Self::default(),
            Some(Raw::Integer(value)) => Self::from(value),
            Some(Raw::Text(text)) => Self::from(text),
        })
    }
}

/// Identifies entities that expose a stable unique identifier.
pub trait Identifiable {
    fn id(&self) -> &EntityId;
}

/// Index of the entity carrying `id`, if any.
pub fn position_of<T: Identifiable>(items: &[T], id: &EntityId) -> Option<usize> {
    items.iter().position(|item| item.id() == id)
}

/// Supplies a presentation-ready label for UI or logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Date attributes an entity can be filtered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateField {
    /// Transaction date.
    #[default]
    Date,
    CreatedAt,
    ModifiedAt,
}

/// Entities that can be placed on a calendar by one of their date fields.
pub trait DatedEntity {
    fn date_for(&self, field: DateField) -> Option<NaiveDate>;
}

/// Read access to the attributes the filter engine and aggregators inspect.
///
/// Implemented for stored records and for projected occurrences so both flow
/// through the same predicates.
pub trait Transactional {
    fn record_type(&self) -> RecordType;
    fn amount(&self) -> f64;
    fn effective_date(&self) -> Option<NaiveDate>;
    fn tags(&self) -> &[String];
    fn description(&self) -> &str;

    /// Signed contribution: credits add, debits subtract.
    fn signed_amount(&self) -> f64 {
        self.amount() * self.record_type().sign()
    }
}

impl<T: Transactional + ?Sized> Transactional for &T {
    fn record_type(&self) -> RecordType {
        (**self).record_type()
    }

    fn amount(&self) -> f64 {
        (**self).amount()
    }

    fn effective_date(&self) -> Option<NaiveDate> {
        (**self).effective_date()
    }

    fn tags(&self) -> &[String] {
        (**self).tags()
    }

    fn description(&self) -> &str {
        (**self).description()
    }
}
