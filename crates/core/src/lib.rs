//! Core domain for blockdeck: the static service catalog, requirement
//! matching, slide composition, and deck assembly. Everything here is pure
//! and request-scoped; no persistence, no network.

pub mod catalog;
pub mod compose;
pub mod config;
pub mod deck;
pub mod icons;
pub mod matcher;

pub use catalog::{Catalog, CategoryId, Rgb, ServiceCategory, CROSS_CUTTING_SERVICES};
pub use compose::{
    compose, GridGeometry, Recommendation, SlideSpec, ADVISORY_MAX_BLOCKS, MAX_PRIMARY_PER_BLOCK,
};
pub use deck::{building_block_deck, derive_filename, narrative_deck, DeckSpec};
pub use icons::{IconRef, IconResolver};
pub use matcher::{Categorizer, KeywordCategorizer};
