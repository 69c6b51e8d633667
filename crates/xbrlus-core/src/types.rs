//! Core identifier and classification types for XBRL US filings.
//!
//! This module defines the newtypes used to key filings and their contents:
//!
//! - [`Ticker`] - Stock ticker symbol
//! - [`ReportId`] - One filed report (e.g. a 10-K)
//! - [`DtsId`] - Document taxonomy set grouping a filing's concepts and facts
//! - [`NetworkId`] - One presentation/ordering tree within a filing
//! - [`ConceptId`] - One financial-reporting line item
//! - [`StatementType`] - The kind of financial statement being extracted

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A stock ticker symbol.
///
/// Tickers are automatically uppercased on creation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ticker(String);

impl Ticker {
    /// Creates a new ticker from a string, converting to uppercase.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into().to_uppercase())
    }

    /// Returns the ticker as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Ticker {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Ticker {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

macro_rules! id_newtype {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash,
            Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Creates a new identifier from its raw value.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Returns the raw identifier value.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }
    };
}

id_newtype! {
    /// Identifier of one filed report (e.g. a single 10-K).
    ReportId
}

id_newtype! {
    /// Identifier of the document taxonomy set grouping all concepts and
    /// facts belonging to one filing's taxonomy instance.
    DtsId
}

id_newtype! {
    /// Identifier of one presentation network (rendering/ordering tree of
    /// statement line items) within a filing.
    NetworkId
}

id_newtype! {
    /// Identifier of a named financial-reporting line item.
    ConceptId
}

/// Human-readable role-description variants under which filers label their
/// income statement's presentation network.
pub const INCOME_STATEMENT_ROLES: &[&str] = &[
    "Statement - Consolidated Statements of Operations",
    "Statement of Operations",
    "Consolidated Statements of Income",
    "Consolidated Statements of Operations",
    "Consolidated Statements of Earnings",
    "Statements of Consolidated Income",
];

/// The kind of financial statement to extract from a filing.
///
/// Only [`StatementType::IncomeStatement`] has role descriptions defined;
/// network resolution for the other variants is a benign no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatementType {
    /// Income statement / statement of operations.
    IncomeStatement,
    /// Balance sheet / statement of financial position.
    BalanceSheet,
    /// Cash flow statement.
    CashFlow,
}

impl StatementType {
    /// Returns the role-description variants used to locate this statement's
    /// presentation network, or `None` if none are defined yet.
    #[must_use]
    pub const fn role_descriptions(self) -> Option<&'static [&'static str]> {
        match self {
            Self::IncomeStatement => Some(INCOME_STATEMENT_ROLES),
            Self::BalanceSheet | Self::CashFlow => None,
        }
    }
}

impl fmt::Display for StatementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::IncomeStatement => "Income Statement",
            Self::BalanceSheet => "Balance Sheet",
            Self::CashFlow => "Cash Flow Statement",
        };
        write!(f, "{name}")
    }
}
