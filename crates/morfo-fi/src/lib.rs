//! Finnish morphological analysis over a VFST dictionary.
//!
//! [`FinnishAnalyzer`] maps a word to transducer input, enumerates the
//! accepting paths of a [`morfo_fst::Dictionary`] and interprets each path
//! under the tagging conventions of the Finnish `mor.vfst` dictionary.
//!
//! ```no_run
//! use morfo_fi::{Analyzer, FinnishAnalyzer};
//! use morfo_fst::Dictionary;
//!
//! let dictionary = Dictionary::from_file("mor.vfst")?;
//! let analyzer = FinnishAnalyzer::new(dictionary);
//! for analysis in analyzer.analyze("kissoille")? {
//!     println!("{:?} {:?}", analysis.base_form, analysis.word_class);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Architecture
//!
//! - [`morphology`] -- The [`Analyzer`] trait, the rule layer and the analyzer
//! - [`config`] -- Output toggles, compound policy and limits
//! - [`cache`] -- Optional caller-owned result cache
//! - [`error`] -- Analysis and configuration errors

pub mod cache;
pub mod config;
pub mod error;
pub mod morphology;

pub use cache::AnalysisCache;
pub use config::{AnalyzerConfig, CompoundPolicy, MAX_ANALYSIS_COUNT, MAX_WORD_LENGTH};
pub use error::{AnalysisError, ConfigError};
pub use morphology::{Analyzer, FinnishAnalyzer, FinnishRules};

pub use morfo_core::{Analysis, Segment, Tag, Word, WordPart};
