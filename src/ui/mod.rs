//! View helpers for the wall, error list, and loading overlay

pub mod wall;
