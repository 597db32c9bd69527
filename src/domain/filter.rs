use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::record::RecordType;
use crate::domain::serde_helpers::{empty_as_none, lenient_number};

/// Raw `{startDate, endDate}` date expressions as entered by the user. Each
/// side is parsed independently when the range is resolved.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DateFilterConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl DateFilterConfig {
    pub fn new(start: Option<&str>, end: Option<&str>) -> Self {
        Self {
            start_date: start.map(str::to_string),
            end_date: end.map(str::to_string),
        }
    }

    pub fn between(start: &str, end: &str) -> Self {
        Self::new(Some(start), Some(end))
    }

    pub fn is_set(&self) -> bool {
        let filled = |side: &Option<String>| side.as_deref().is_some_and(|s| !s.trim().is_empty());
        filled(&self.start_date) || filled(&self.end_date)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AmountOp {
    Eq,
    Lt,
    Lte,
    Gt,
    Gte,
    Between,
}

impl FromStr for AmountOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eq" => Ok(AmountOp::Eq),
            "lt" => Ok(AmountOp::Lt),
            "lte" => Ok(AmountOp::Lte),
            "gt" => Ok(AmountOp::Gt),
            "gte" => Ok(AmountOp::Gte),
            "between" => Ok(AmountOp::Between),
            other => Err(format!("unknown amount operator `{other}`")),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TagMatchMode {
    #[default]
    Any,
    All,
}

impl FromStr for TagMatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "any" => Ok(TagMatchMode::Any),
            "all" => Ok(TagMatchMode::All),
            other => Err(format!("unknown tag match mode `{other}`")),
        }
    }
}

/// Bucket width for chart series.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Interval {
    Daily,
    #[default]
    Monthly,
    Yearly,
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Interval::Daily => "daily",
            Interval::Monthly => "monthly",
            Interval::Yearly => "yearly",
        })
    }
}

impl FromStr for Interval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Interval::Daily),
            "monthly" => Ok(Interval::Monthly),
            "yearly" => Ok(Interval::Yearly),
            other => Err(format!("unknown interval `{other}`")),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    #[default]
    Date,
    Amount,
    Description,
    Type,
    StartDate,
    EndDate,
    CreatedAt,
    ModifiedAt,
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date" => Ok(SortField::Date),
            "amount" => Ok(SortField::Amount),
            "description" => Ok(SortField::Description),
            "type" => Ok(SortField::Type),
            "startDate" => Ok(SortField::StartDate),
            "endDate" => Ok(SortField::EndDate),
            "createdAt" => Ok(SortField::CreatedAt),
            "modifiedAt" => Ok(SortField::ModifiedAt),
            other => Err(format!("unknown sort field `{other}`")),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("unknown sort order `{other}`")),
        }
    }
}

/// Compound record predicate. Absent fields impose no constraint.
///
/// Older saved filters use `amtOp`, `amtVal`, `amtVal2` and `tagOp`, and may
/// carry plain `from` / `to` dates instead of `dateFilter`; both are still
/// read.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FilterSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_filter: Option<DateFilterConfig>,
    #[serde(
        rename = "type",
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub record_type: Option<RecordType>,
    #[serde(
        alias = "amtOp",
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount_op: Option<AmountOp>,
    #[serde(
        alias = "amtVal",
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount_value: Option<f64>,
    #[serde(
        alias = "amtVal2",
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount_value2: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(
        alias = "tagOp",
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub tag_match_mode: Option<TagMatchMode>,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub search: Option<String>,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub from: Option<NaiveDate>,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub to: Option<NaiveDate>,
}

impl FilterSpec {
    pub fn with_dates(mut self, config: DateFilterConfig) -> Self {
        self.date_filter = Some(config);
        self
    }

    pub fn with_type(mut self, record_type: RecordType) -> Self {
        self.record_type = Some(record_type);
        self
    }

    pub fn with_amount(mut self, op: AmountOp, value: f64) -> Self {
        self.amount_op = Some(op);
        self.amount_value = Some(value);
        self
    }

    pub fn with_amount_between(mut self, low: f64, high: f64) -> Self {
        self.amount_op = Some(AmountOp::Between);
        self.amount_value = Some(low);
        self.amount_value2 = Some(high);
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I, mode: TagMatchMode) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self.tag_match_mode = Some(mode);
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn tag_mode(&self) -> TagMatchMode {
        self.tag_match_mode.unwrap_or_default()
    }

    /// Number of active predicate groups (date, type, tags, amount), as shown
    /// on filter badges.
    pub fn active_count(&self) -> usize {
        let date_active = self
            .date_filter
            .as_ref()
            .map(DateFilterConfig::is_set)
            .unwrap_or(self.from.is_some() || self.to.is_some());
        [
            date_active,
            self.record_type.is_some(),
            !self.tags.is_empty(),
            self.amount_op.is_some(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }
}

/// A filter persisted for one page together with that page's view state.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SavedFilter {
    #[serde(flatten)]
    pub filter: FilterSpec,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub interval: Option<Interval>,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub sort_field: Option<SortField>,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub sort_order: Option<SortOrder>,
    #[serde(default)]
    pub include_deleted: bool,
}

impl SavedFilter {
    pub fn new(filter: FilterSpec) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    pub fn with_interval(mut self, interval: Interval) -> Self {
        self.interval = Some(interval);
        self
    }

    pub fn with_sort(mut self, field: SortField, order: SortOrder) -> Self {
        self.sort_field = Some(field);
        self.sort_order = Some(order);
        self
    }
}
