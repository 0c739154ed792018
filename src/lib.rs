//! cdnmon - terminal dashboard for CDN distributions
//!
//! The filter state in [`models::FilterState`] drives everything: the
//! [`editor`] derives new states from user edits, [`query`] turns a state
//! into request parameters, [`api`] performs the request and [`fetch`]
//! caches responses per state so only the current one is ever shown.

pub mod actions;
pub mod api;
pub mod display;
pub mod editor;
pub mod fetch;
pub mod formatting;
pub mod logging;
pub mod models;
pub mod pagination;
pub mod query;
pub mod tui;
