//! Declaration diff engine.
//!
//! Compares matched before/after declarations and classifies each pair as
//! no change, non-breaking or breaking for callers of the package.
//!
//! # Rules
//!
//! - **Kinds**: a declaration changing kind is always breaking
//! - **Structs**: removing or retyping an exported field breaks, adding does not
//! - **Interfaces**: adding or retyping a method breaks, removing does not
//! - **Functions**: parameter and result changes break, except appending a
//!   variadic parameter, turning the last parameter variadic, and passing a
//!   narrower interface
//! - **Channels**: dropping a direction is non-breaking, changing it breaks

pub mod changes;
pub mod comparator;
pub mod fields;

pub use changes::{Change, CheckSummary, Classification, DeclChange};
pub use comparator::DeclChecker;
pub use fields::FieldDiff;
