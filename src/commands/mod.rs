//! Command implementations

pub mod analyse;
pub mod check;
pub mod clean;
pub mod completions;
pub mod helpers;
pub mod stores;
pub mod version;
