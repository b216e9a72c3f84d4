//! Shared value types for Finnish morphological analysis.
//!
//! - [`tags`] -- The closed tag vocabulary of the dictionary
//! - [`attributes`] -- Typed attribute values with their legacy spellings
//! - [`analysis`] -- Analysis results, segments and word parts
//! - [`character`] -- Finnish character helpers

pub mod analysis;
pub mod attributes;
pub mod character;
pub mod tags;

pub use analysis::{Analysis, Segment, Word, WordPart};
pub use tags::Tag;
