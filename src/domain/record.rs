use std::{fmt, str::FromStr};

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::common::{
    DateField, DatedEntity, Displayable, EntityId, Identifiable, Transactional,
};
use crate::domain::serde_helpers::empty_as_none;

/// Direction of a financial record. Amounts are always non-negative; the
/// type carries the sign.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RecordType {
    Credit,
    Debit,
}

impl RecordType {
    pub fn as_str(self) -> &'static str {
        match self {
            RecordType::Credit => "Credit",
            RecordType::Debit => "Debit",
        }
    }

    pub fn sign(self) -> f64 {
        match self {
            RecordType::Credit => 1.0,
            RecordType::Debit => -1.0,
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Credit" => Ok(RecordType::Credit),
            "Debit" => Ok(RecordType::Debit),
            other => Err(format!("unknown record type `{other}`")),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum IntervalUnit {
    Days,
    #[default]
    Months,
    Years,
}

impl FromStr for IntervalUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Days" => Ok(IntervalUnit::Days),
            "Months" => Ok(IntervalUnit::Months),
            "Years" => Ok(IntervalUnit::Years),
            other => Err(format!("unknown interval unit `{other}`")),
        }
    }
}

/// Periodic regeneration rule embedded in a record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Recurrence {
    #[serde(default)]
    pub enabled: bool,
    /// Falls back to the owning record's date when absent.
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_date: Option<NaiveDate>,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_date: Option<NaiveDate>,
    #[serde(default = "Recurrence::default_interval_value")]
    pub interval_value: i32,
    #[serde(default, deserialize_with = "Recurrence::unit_or_default")]
    pub interval_unit: IntervalUnit,
}

impl Recurrence {
    pub fn new(interval_value: i32, interval_unit: IntervalUnit) -> Self {
        Self {
            enabled: true,
            start_date: None,
            end_date: None,
            interval_value,
            interval_unit,
        }
    }

    pub fn monthly() -> Self {
        Self::new(1, IntervalUnit::Months)
    }

    pub fn starting(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    pub fn ending(mut self, date: NaiveDate) -> Self {
        self.end_date = Some(date);
        self
    }

    fn default_interval_value() -> i32 {
        1
    }

    fn unit_or_default<'de, D>(deserializer: D) -> Result<IntervalUnit, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(empty_as_none(deserializer)?.unwrap_or_default())
    }
}

/// A stored financial transaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    #[serde(default)]
    pub id: EntityId,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub amount: f64,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring: Option<Recurrence>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Record {
    /// Builds an unsaved record; the store assigns the identifier.
    ///
    /// Negative amounts are folded to their magnitude so the direction stays
    /// on `record_type`.
    pub fn new(record_type: RecordType, amount: f64, date: NaiveDate) -> Self {
        Self {
            id: EntityId::default(),
            record_type,
            amount: amount.abs(),
            date: Some(date),
            description: String::new(),
            tags: Vec::new(),
            recurring: None,
            created_at: None,
            modified_at: None,
            deleted_at: None,
        }
    }

    pub fn credit(amount: f64, date: NaiveDate) -> Self {
        Self::new(RecordType::Credit, amount, date)
    }

    pub fn debit(amount: f64, date: NaiveDate) -> Self {
        Self::new(RecordType::Debit, amount, date)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_recurrence(mut self, recurrence: Recurrence) -> Self {
        self.recurring = Some(recurrence);
        self
    }

    /// Returns the recurrence rule only when it is switched on.
    pub fn active_recurrence(&self) -> Option<&Recurrence> {
        self.recurring.as_ref().filter(|rule| rule.enabled)
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

impl Identifiable for Record {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl Displayable for Record {
    fn display_label(&self) -> String {
        let date = self
            .date
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        format!("{} {} {:.2} {}", date, self.record_type, self.amount, self.description)
            .trim()
            .to_string()
    }
}

impl Transactional for Record {
    fn record_type(&self) -> RecordType {
        self.record_type
    }

    fn amount(&self) -> f64 {
        self.amount
    }

    fn effective_date(&self) -> Option<NaiveDate> {
        self.date
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn description(&self) -> &str {
        &self.description
    }
}

impl DatedEntity for Record {
    fn date_for(&self, field: DateField) -> Option<NaiveDate> {
        match field {
            DateField::Date => self.date,
            DateField::CreatedAt => self.created_at.map(local_date),
            DateField::ModifiedAt => self.modified_at.map(local_date),
        }
    }
}

fn local_date(timestamp: DateTime<Utc>) -> NaiveDate {
    timestamp.with_timezone(&Local).date_naive()
}

/// A record as seen by the filter engine: either the stored record itself or
/// a projected occurrence of a recurring record on a generated date.
///
/// Projected entries borrow their source and are never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RecordEntry<'a> {
    Stored(&'a Record),
    Projected { source: &'a Record, date: NaiveDate },
}

impl<'a> RecordEntry<'a> {
    pub fn source(&self) -> &'a Record {
        match self {
            RecordEntry::Stored(record) => record,
            RecordEntry::Projected { source, .. } => source,
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            RecordEntry::Stored(record) => record.date,
            RecordEntry::Projected { date, .. } => Some(*date),
        }
    }

    pub fn is_projected(&self) -> bool {
        matches!(self, RecordEntry::Projected { .. })
    }

    /// Materializes an owned copy with the occurrence date applied.
    pub fn to_record(&self) -> Record {
        let mut record = self.source().clone();
        record.date = self.date();
        record
    }
}

impl Transactional for RecordEntry<'_> {
    fn record_type(&self) -> RecordType {
        self.source().record_type
    }

    fn amount(&self) -> f64 {
        self.source().amount
    }

    fn effective_date(&self) -> Option<NaiveDate> {
        self.date()
    }

    fn tags(&self) -> &[String] {
        &self.source().tags
    }

    fn description(&self) -> &str {
        &self.source().description
    }
}

impl DatedEntity for RecordEntry<'_> {
    fn date_for(&self, field: DateField) -> Option<NaiveDate> {
        match field {
            DateField::Date => self.date(),
            other => self.source().date_for(other),
        }
    }
}
