use serde::{Deserialize, Serialize};

use crate::domain::common::{Displayable, EntityId, Identifiable};
use crate::domain::filter::FilterSpec;

/// Reduction applied to a widget's filtered record set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    /// Signed sum: credits add, debits subtract.
    #[default]
    Sum,
    Count,
}

/// A dashboard card reducing a filtered record set to one number.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Widget {
    #[serde(default)]
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub aggregation: Aggregation,
    #[serde(default)]
    pub filter: FilterSpec,
}

impl Widget {
    pub fn new(name: impl Into<String>, aggregation: Aggregation, filter: FilterSpec) -> Self {
        Self {
            id: EntityId::default(),
            name: name.into(),
            aggregation,
            filter,
        }
    }
}

impl Identifiable for Widget {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl Displayable for Widget {
    fn display_label(&self) -> String {
        let aggregation = match self.aggregation {
            Aggregation::Sum => "sum",
            Aggregation::Count => "count",
        };
        format!("{} ({aggregation})", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_ids_from_older_registries_load() {
        let json = r#"{
            "id": "1718000000000",
            "name": "Food",
            "aggregation": "sum",
            "filter": {"amtOp": "", "tagOp": "any", "tags": ["food"]}
        }"#;
        let widget: Widget = serde_json::from_str(json).unwrap();
        assert_eq!(widget.id.as_str(), "1718000000000");
        assert_eq!(widget.display_label(), "Food (sum)");
    }
}
