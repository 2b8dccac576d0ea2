//! Undo and redo for the animation editor.
//!
//! Edits to objects are expressed as [`commands::Command`]s and recorded in a bounded [`history::History`],
//! which applies them to any [`store::ObjectStore`]. [`state::Scene`] is the in-memory store.

pub mod color;
pub mod commands;
pub mod history;
pub mod id;
pub mod state;
pub mod store;

pub use id::AnimObjId;
