//! Turn and eligibility logic for the SP21 table client. Keep this crate free of IO and platform concerns.

pub mod cards;
pub mod catalog;
pub mod controller;
pub mod events;
pub mod inventory;
pub mod recovery;
pub mod render;
pub mod rules;
pub mod state;
pub mod wire;

pub use cards::*;
pub use catalog::*;
pub use controller::*;
pub use events::*;
pub use inventory::*;
pub use recovery::*;
pub use render::*;
pub use rules::*;
pub use state::*;
pub use wire::*;
