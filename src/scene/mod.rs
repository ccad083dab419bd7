//! Header configuration model and its edit helpers.

pub mod model;
pub mod patch;
pub mod templates;
