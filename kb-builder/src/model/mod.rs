//! Data model of the knowledge base: categories, tags, raw parser records
//! and merged entries.

pub mod category;
pub mod entry;
pub mod tag;
