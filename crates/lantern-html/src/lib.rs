//! HTML parsing for the Lantern browser core.
//!
//! [`tag`] defines the fixed set of recognized tags, [`dom`] the
//! fixed-capacity node arena, and [`parser`] the character-level state
//! machine that turns markup into a tree. Parsing never fails: malformed
//! input and arena exhaustion both degrade to a partial tree.

pub mod dom;
pub mod parser;
pub mod tag;

pub use dom::{Document, ElementData, Node, NodeId, NodeKind};
pub use parser::parse;
pub use tag::TagKind;
