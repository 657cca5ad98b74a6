//! # Recipes Telegram Bot
//!
//! A Telegram bot that serves recipes from a local SQLite database: random
//! picks, ingredient search, and cyclic paging through search results.

pub mod bot;
pub mod config;
pub mod db;
pub mod formatter;
pub mod liveness;
pub mod localization;
pub mod observability;
pub mod router;
pub mod session;
