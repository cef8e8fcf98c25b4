//! Scoring engine for two-round quiz competitions.
//!
//! A competition snapshot (teams, questions, an append-only answer log and
//! the email log) is loaded from disk, validated into a [`store::Competition`]
//! and turned into one of three text reports: the results table, the
//! per-question answer collection, or the duty-robot submission summary.

pub mod collection;
pub mod consistency;
pub mod error;
pub mod input;
pub mod model;
pub mod rating;
pub mod report;
pub mod resolver;
pub mod store;
pub mod summary;
