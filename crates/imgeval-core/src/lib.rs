pub mod api;
pub mod catalog;
pub mod config;
pub mod consts;
pub mod diff;
pub mod error;
pub mod loader;
pub mod model;
pub mod pairs;
pub mod panel;
pub mod scores;
pub mod session;
pub mod transform;
pub mod viewport;
