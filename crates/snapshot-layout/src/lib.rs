//! Pagination and slide layout for dashboard snapshot exports
//!
//! Captured section snapshots become two deliverables: a paginated
//! document with a header and footer on every page, and a 16:9 slide deck
//! with one slide per section. This crate does the geometry and ordering;
//! capturing and file encoding are injected through `Capturer` and the
//! encoder traits.

pub mod assemble;
mod capture;
pub mod constants;
mod encode;
mod export;
pub mod layout;
mod options;
mod stats;
mod types;

pub use assemble::{Deck, DeckBuilder, Document, DocumentAssembler, assemble_deck};
pub use capture::*;
pub use encode::*;
pub use export::*;
pub use layout::{PlacementRect, Rect, Slide, SlideKind, TextBlock, TextRole, paginate};
pub use options::*;
pub use stats::calculate_statistics;
pub use types::*;
