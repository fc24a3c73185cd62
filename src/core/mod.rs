pub mod catalog;
pub mod filter;
pub mod loader;
pub mod logging;
pub mod model;
pub mod prefs;
pub mod text;
