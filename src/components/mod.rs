//! UI components.

pub mod mind_map;
