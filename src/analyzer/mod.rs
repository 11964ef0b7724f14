//! Proposal engine for the next version of a tagged repository

pub mod actions;

pub use actions::{propose_actions, Action};
