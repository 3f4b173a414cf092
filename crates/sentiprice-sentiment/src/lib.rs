//! Headline sentiment scoring.
//!
//! Two independent strategies run over the same article text:
//!
//! - [`LexiconScorer`]: counts curated market-vocabulary hits.
//! - [`PolarityClassifier`]: scores each sentence with a compound-polarity
//!   model (VADER by default) and takes a supermajority vote.
//!
//! Both are built once from immutable configuration and shared by reference.

pub mod lexicon;
pub mod polarity;

pub use lexicon::{Lexicon, LexiconScore, LexiconScorer};
pub use polarity::{
    CompoundScorer, PolarityClassifier, PolarityThresholds, PolarityVerdict, VaderScorer,
};
