#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/xbrlus-rs/xbrlus/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! OAuth2 token session and authenticated gateway for the XBRL US API.
//!
//! # Example
//!
//! ```rust,ignore
//! use xbrlus_client::{ApiGateway, Credentials, TokenSession};
//! use xbrlus_core::Gateway;
//!
//! #[tokio::main]
//! async fn main() -> xbrlus_core::Result<()> {
//!     let credentials = Credentials::new(id, secret, username, password, "rust");
//!     let session = TokenSession::connect(credentials).await?;
//!     let gateway = ApiGateway::new(session);
//!
//!     let body = gateway.get("report/search", &params).await?;
//!     Ok(())
//! }
//! ```

/// Credentials and the token session.
pub mod auth;
/// The `Gateway` implementation.
pub mod gateway;

pub use auth::{Credentials, TOKEN_URL, TokenSession};
pub use gateway::{API_BASE_URL, ApiGateway};
