//! DIGGS document tree types.
//!
//! - [`DiggsDocument`] - The root document container
//! - [`Element`] - A named node with attributes, text and children
//! - [`Text`] - Inline or multi-line element text

mod document;
mod element;

pub use document::{DiggsDocument, ROOT_ELEMENT};
pub use element::{Descendants, Element, Text};
