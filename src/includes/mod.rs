//! Include requests and their canonical form
//!
//! - `include.rs` - the caller-facing request shapes
//! - `normalize.rs` - routing table from relation name to sub-includes

mod include;
mod normalize;

pub use include::Include;
pub use normalize::Includes;
