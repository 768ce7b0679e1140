use crate::{CardClass, CardSlot, Catalog, LogLine, MessageLog, RoundSnapshot, UiPermissionSet};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const NONE_LABEL: &str = "none";

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Screen {
    /// Before the first round, and again after a full reset.
    #[default]
    Title,
    Table,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PointsLabel {
    Known(i64),
    Unknown,
}

impl From<Option<i64>> for PointsLabel {
    fn from(value: Option<i64>) -> Self {
        value.map(Self::Known).unwrap_or(Self::Unknown)
    }
}

impl fmt::Display for PointsLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(points) => write!(f, "{points}"),
            Self::Unknown => f.write_str("--"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpecialRow {
    pub id: String,
    pub name: String,
    pub narration: String,
    pub count: u32,
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HeldRow {
    pub label: String,
    pub count: u32,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ControlStates {
    pub start: bool,
    pub draw: bool,
    pub stand: bool,
    pub next_round: bool,
    pub reset: bool,
}

/// Controller state that is not part of the engine snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Chrome {
    pub screen: Screen,
    pub busy: bool,
    pub reset_enabled: bool,
    pub session_over: bool,
}

/// Everything a shell needs to draw one frame. Built fresh every time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableView {
    pub screen: Screen,
    pub busy: bool,
    pub player_hand: Vec<CardSlot>,
    pub opponent_hand: Vec<CardSlot>,
    pub player_points: PointsLabel,
    pub opponent_points: PointsLabel,
    pub instant_cards: Vec<SpecialRow>,
    pub declare_cards: Vec<SpecialRow>,
    pub unrecognized: Vec<HeldRow>,
    pub opponent_specials: Vec<HeldRow>,
    pub player_declared: String,
    pub opponent_declared: String,
    pub controls: ControlStates,
    pub round_over: bool,
    pub session_over: bool,
    pub log: Vec<LogLine>,
}

impl TableView {
    /// Local special cards in display order: instant first, then declare.
    pub fn special_rows(&self) -> impl Iterator<Item = &SpecialRow> {
        self.instant_cards.iter().chain(self.declare_cards.iter())
    }

    pub fn special_count(&self) -> usize {
        self.instant_cards.len() + self.declare_cards.len()
    }
}

fn declared_label(catalog: &Catalog, declared: Option<&str>) -> String {
    declared
        .map(|id| catalog.display_name(id).to_string())
        .unwrap_or_else(|| NONE_LABEL.to_string())
}

pub fn project(
    snapshot: &RoundSnapshot,
    permissions: &UiPermissionSet,
    catalog: &Catalog,
    chrome: Chrome,
    log: &MessageLog,
) -> TableView {
    let mut instant_cards = Vec::new();
    let mut declare_cards = Vec::new();
    let mut unrecognized = Vec::new();
    for (id, count) in snapshot.player_specials.held() {
        let Some(def) = catalog.get(id) else {
            unrecognized.push(HeldRow {
                label: id.to_string(),
                count,
            });
            continue;
        };
        let row = SpecialRow {
            id: id.to_string(),
            name: def.name.clone(),
            narration: def.narration.clone(),
            count,
            enabled: permissions.can_use(id),
        };
        match def.class {
            CardClass::Instant => instant_cards.push(row),
            CardClass::Declare => declare_cards.push(row),
        }
    }

    let opponent_specials = snapshot
        .opponent_specials
        .held()
        .map(|(id, count)| HeldRow {
            label: catalog.display_name(id).to_string(),
            count,
        })
        .collect();

    TableView {
        screen: chrome.screen,
        busy: chrome.busy,
        player_hand: snapshot.player_slots(),
        opponent_hand: snapshot.opponent_slots(),
        player_points: snapshot.player_points.into(),
        opponent_points: snapshot.opponent_points.into(),
        instant_cards,
        declare_cards,
        unrecognized,
        opponent_specials,
        player_declared: declared_label(catalog, snapshot.player_declared.as_deref()),
        opponent_declared: declared_label(catalog, snapshot.opponent_declared.as_deref()),
        controls: ControlStates {
            start: chrome.screen == Screen::Title && !chrome.busy,
            draw: permissions.draw,
            stand: permissions.stand,
            next_round: permissions.next_round,
            reset: chrome.reset_enabled && !chrome.busy,
        },
        round_over: snapshot.round_over,
        session_over: chrome.session_over,
        log: log.lines().to_vec(),
    }
}
