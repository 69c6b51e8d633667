#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/xbrlus-rs/xbrlus/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Financial statement extraction pipeline over the XBRL US API.
//!
//! The pipeline for one report: resolve the statement's presentation
//! network, load its concept tree, page through the report's facts, then
//! join everything into a presentation-ordered table.
//!
//! # Example
//!
//! ```rust,ignore
//! use xbrlus_statements::{Company, StatementType, to_dataframe};
//! use xbrlus_core::Ticker;
//!
//! let mut company = Company::new(Ticker::new("BA"));
//! company.load_annual_reports(&gateway, &[2024]).await?;
//!
//! for report in company.reports_mut() {
//!     report.load_statement(&gateway, StatementType::IncomeStatement).await;
//!     if let Some(statement) = report.statement(StatementType::IncomeStatement) {
//!         let df = to_dataframe(&statement.assemble())?;
//!         println!("{df}");
//!     }
//! }
//! ```

/// Joining concepts and facts into ordered statement lines.
pub mod assemble;
/// Companies, reports, and statement orchestration.
pub mod company;
/// Concept/relationship tree retrieval.
pub mod concepts;
/// Paginated fact retrieval.
pub mod facts;
/// Presentation network resolution.
pub mod network;
/// Typed endpoint response records.
pub mod records;

pub use assemble::{
    StatementLine, assemble, concepts_to_dataframe, facts_to_dataframe, to_dataframe,
};
pub use company::{Company, DOCUMENT_TYPE_10K, FinancialStatement, Report};
pub use concepts::{PARENT_CHILD_ARCROLE, load_concepts};
pub use facts::{PAGE_SIZE, load_facts};
pub use network::{NetworkLookup, PRESENTATION_LINK_NAME, find_statement_network};
pub use records::{ConceptRecord, FactRecord, NetworkRecord, ReportRecord};

// Re-exported so downstream callers rarely need xbrlus-core directly.
pub use xbrlus_core::StatementType;
