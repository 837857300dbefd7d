//! Board representation.
//!
//! Contains territory records, their bounded labels, and the registry that
//! owns every territory of a session.

pub mod registry;
pub mod territory;

pub use registry::{Registry, RegistryError};
pub use territory::{
    parse_troops, Faction, Field, FieldIssue, Label, LabelPolicy, Territory, TerritoryName,
    MAX_FACTION_LEN, MAX_NAME_LEN,
};
