#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/xbrlus-rs/xbrlus/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Client for the XBRL US API.
//!
//! # Example
//!
//! ```rust,ignore
//! use xbrlus::{ApiGateway, Company, Credentials, StatementType, Ticker, TokenSession};
//!
//! #[tokio::main]
//! async fn main() -> xbrlus::Result<()> {
//!     let credentials = Credentials::new(id, secret, username, password, "rust");
//!     let session = TokenSession::connect(credentials).await?;
//!     let gateway = ApiGateway::new(session);
//!
//!     let mut company = Company::new(Ticker::new("BA"));
//!     company.load_annual_reports(&gateway, &[2024]).await?;
//!
//!     for report in company.reports_mut() {
//!         report.load_statement(&gateway, StatementType::IncomeStatement).await;
//!     }
//!     Ok(())
//! }
//! ```

// Core types and the gateway trait
pub use xbrlus_core::*;

// Authentication and the gateway implementation
pub use xbrlus_client::{API_BASE_URL, ApiGateway, Credentials, TOKEN_URL, TokenSession};

// The statement extraction pipeline
pub use xbrlus_statements::{
    Company, ConceptRecord, FactRecord, FinancialStatement, NetworkLookup, NetworkRecord, Report,
    ReportRecord, StatementLine, assemble, concepts_to_dataframe, facts_to_dataframe,
    find_statement_network, load_concepts, load_facts, to_dataframe,
};
