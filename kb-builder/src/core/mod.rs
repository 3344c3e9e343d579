//! Text-level building blocks: HTML line extraction, normalization, ids.

pub mod html;
pub mod ids;
pub mod normalize;
