//! Asset loading for the table client: special-card catalog and client config.

pub mod load;
pub mod schema;

pub use load::*;
pub use schema::*;
