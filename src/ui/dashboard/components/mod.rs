//! Dashboard component modules
//!
//! Contains all individual rendering components

pub mod footer;
pub mod header;
pub mod info_panel;
pub mod input;
pub mod lots;
pub mod logs;
