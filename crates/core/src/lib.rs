//! Domain types and pure logic shared by the database and API crates.
//!
//! Nothing in this crate touches the database or the network. The
//! translation synchronizer reaches its store only through the
//! [`translation_sync::TranslationStore`] trait.

pub mod error;
pub mod languages;
pub mod listing;
pub mod pagination;
pub mod translation_sync;
pub mod types;
