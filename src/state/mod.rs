//! State management module
//!
//! This module handles all application state, including:
//! - Shared data structures (data.rs)
//! - The debounced query controller (query.rs)
//! - Masonry geometry and the layout algorithm (layout.rs)
//! - The wall engine state machine: pagination, errors, columns (wall.rs)

pub mod data;
pub mod layout;
pub mod query;
pub mod wall;
