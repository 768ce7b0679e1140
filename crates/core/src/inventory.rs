use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Special card id -> count held, as reported by the engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct SpecialInventory {
    counts: BTreeMap<String, u32>,
}

impl SpecialInventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_card(mut self, id: &str, count: u32) -> Self {
        self.counts.insert(id.to_string(), count);
        self
    }

    pub fn count(&self, id: &str) -> u32 {
        self.counts.get(id).copied().unwrap_or(0)
    }

    /// Entries with at least one copy, in id order.
    pub fn held(&self) -> impl Iterator<Item = (&str, u32)> {
        self.counts
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(id, count)| (id.as_str(), *count))
    }

    pub fn is_empty(&self) -> bool {
        self.held().next().is_none()
    }
}

impl FromIterator<(String, u32)> for SpecialInventory {
    fn from_iter<T: IntoIterator<Item = (String, u32)>>(iter: T) -> Self {
        Self {
            counts: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_skips_spent_cards() {
        let inventory = SpecialInventory::new()
            .with_card("a", 0)
            .with_card("b", 2);
        let held: Vec<_> = inventory.held().collect();
        assert_eq!(held, vec![("b", 2)]);
        assert_eq!(inventory.count("a"), 0);
        assert_eq!(inventory.count("missing"), 0);
    }

    #[test]
    fn only_zero_counts_is_empty() {
        assert!(SpecialInventory::new().with_card("a", 0).is_empty());
        assert!(!SpecialInventory::new().with_card("a", 1).is_empty());
    }

    #[test]
    fn negative_counts_are_rejected_on_decode() {
        let parsed: Result<SpecialInventory, _> = serde_json::from_str(r#"{"sp_minus_3": -1}"#);
        assert!(parsed.is_err());
    }
}
