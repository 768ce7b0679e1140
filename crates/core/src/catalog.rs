use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

pub const MINUS_THREE_ID: &str = "sp_minus_3";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CardClass {
    /// Resolves on use and never occupies a declared slot.
    Instant,
    /// Sits in the acting side's declared slot until the engine clears it.
    Declare,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpecialCardDef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub narration: String,
    pub class: CardClass,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("duplicate special card id: {0}")]
    DuplicateId(String),
    #[error("special card id must not be empty")]
    EmptyId,
}

/// Local mirror of the engine's special card definitions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    cards: BTreeMap<String, SpecialCardDef>,
}

impl Catalog {
    pub fn builtin() -> Self {
        let mut cards = BTreeMap::new();
        cards.insert(
            MINUS_THREE_ID.to_string(),
            SpecialCardDef {
                id: MINUS_THREE_ID.to_string(),
                name: "Points -3".to_string(),
                narration: "If you win this round, the opponent loses 3 points.".to_string(),
                class: CardClass::Declare,
            },
        );
        Self { cards }
    }

    pub fn from_defs(defs: Vec<SpecialCardDef>) -> Result<Self, CatalogError> {
        let mut cards = BTreeMap::new();
        for def in defs {
            if def.id.trim().is_empty() {
                return Err(CatalogError::EmptyId);
            }
            if cards.contains_key(&def.id) {
                return Err(CatalogError::DuplicateId(def.id));
            }
            cards.insert(def.id.clone(), def);
        }
        Ok(Self { cards })
    }

    pub fn get(&self, id: &str) -> Option<&SpecialCardDef> {
        self.cards.get(id)
    }

    pub fn class_of(&self, id: &str) -> Option<CardClass> {
        self.get(id).map(|def| def.class)
    }

    pub fn is_declare(&self, id: &str) -> bool {
        self.class_of(id) == Some(CardClass::Declare)
    }

    /// Display name, falling back to the raw id for cards we do not know.
    pub fn display_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.get(id).map(|def| def.name.as_str()).unwrap_or(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpecialCardDef> {
        self.cards.values()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
