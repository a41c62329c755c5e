//! Assemblers turning captured sections into encoder-ready descriptors
//!
//! Both assemblers are synchronous and pure apart from logging: all
//! suspension happens while waiting on captures, before they are called.

mod deck;
mod document;

pub use deck::*;
pub use document::*;
