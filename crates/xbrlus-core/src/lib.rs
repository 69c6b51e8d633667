#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/xbrlus-rs/xbrlus/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types and abstractions for the XBRL US API client.
//!
//! This crate provides the foundations shared by the rest of the workspace:
//!
//! - [`XbrlError`](error::XbrlError) - Error type for all API operations
//! - [`Gateway`](gateway::Gateway) - The seam every query passes through
//! - Identifier newtypes and [`StatementType`](types::StatementType)

/// Error types for API operations.
pub mod error;
/// Gateway trait and envelope decoding.
pub mod gateway;
/// Identifier and classification types.
pub mod types;

// Re-export commonly used items at crate root
pub use error::{Result, XbrlError};
pub use gateway::{Gateway, decode_envelope};
pub use types::{
    ConceptId, DtsId, INCOME_STATEMENT_ROLES, NetworkId, ReportId, StatementType, Ticker,
};
