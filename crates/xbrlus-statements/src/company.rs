//! Companies, their filed reports, and per-report statement loading.

use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::{info, warn};

use xbrlus_core::{
    DtsId, Gateway, ReportId, Result, StatementType, Ticker, decode_envelope,
};

use crate::assemble::{StatementLine, assemble};
use crate::concepts::load_concepts;
use crate::facts::load_facts;
use crate::network::{NetworkLookup, find_statement_network};
use crate::records::{ConceptRecord, FactRecord, ReportRecord};

/// Document type of annual reports.
pub const DOCUMENT_TYPE_10K: &str = "10-K";

/// Fields requested per report row from `report/search`.
const REPORT_FIELDS: &[&str] = &[
    "report.id",
    "dts.id",
    "report.year-focus",
    "report.filing-date",
    "report.period-end",
    "report.is-most-current",
    "report.entity-name",
    "report.entry-url",
];

/// Concept and fact rows accumulated for one statement of one report.
///
/// The assembled table is derived on demand via
/// [`FinancialStatement::assemble`], never stored.
#[derive(Debug, Clone)]
pub struct FinancialStatement {
    statement_type: StatementType,
    concepts: Vec<ConceptRecord>,
    facts: Vec<FactRecord>,
}

impl FinancialStatement {
    /// Creates an empty statement of the given type.
    #[must_use]
    pub fn new(statement_type: StatementType) -> Self {
        Self {
            statement_type,
            concepts: Vec::new(),
            facts: Vec::new(),
        }
    }

    /// The kind of statement this is.
    #[must_use]
    pub fn statement_type(&self) -> StatementType {
        self.statement_type
    }

    /// The accumulated concept rows.
    #[must_use]
    pub fn concepts(&self) -> &[ConceptRecord] {
        &self.concepts
    }

    /// The accumulated fact rows.
    #[must_use]
    pub fn facts(&self) -> &[FactRecord] {
        &self.facts
    }

    /// Appends concept rows.
    pub fn add_concepts(&mut self, concepts: impl IntoIterator<Item = ConceptRecord>) {
        self.concepts.extend(concepts);
    }

    /// Appends fact rows.
    pub fn add_facts(&mut self, facts: impl IntoIterator<Item = FactRecord>) {
        self.facts.extend(facts);
    }

    /// Joins the accumulated concepts and facts into a presentation-ordered
    /// table. Recomputed on every call.
    #[must_use]
    pub fn assemble(&self) -> Vec<StatementLine> {
        assemble(&self.concepts, &self.facts)
    }
}

/// One filed 10-K report.
///
/// Identifiers are immutable after construction from a [`ReportRecord`].
#[derive(Debug, Clone)]
pub struct Report {
    report_id: ReportId,
    dts_id: DtsId,
    fiscal_year: i32,
    filing_date: NaiveDate,
    period_end: NaiveDate,
    is_most_current: bool,
    entity_name: String,
    entry_url: String,
    statements: HashMap<StatementType, FinancialStatement>,
}

impl From<ReportRecord> for Report {
    fn from(record: ReportRecord) -> Self {
        Self {
            report_id: record.report_id,
            dts_id: record.dts_id,
            fiscal_year: record.fiscal_year,
            filing_date: record.filing_date,
            period_end: record.period_end,
            is_most_current: record.is_most_current,
            entity_name: record.entity_name,
            entry_url: record.entry_url,
            statements: HashMap::new(),
        }
    }
}

impl Report {
    /// Report identifier.
    #[must_use]
    pub fn report_id(&self) -> ReportId {
        self.report_id
    }

    /// Document taxonomy set identifier.
    #[must_use]
    pub fn dts_id(&self) -> DtsId {
        self.dts_id
    }

    /// Fiscal year the report focuses on.
    #[must_use]
    pub fn fiscal_year(&self) -> i32 {
        self.fiscal_year
    }

    /// Date the report was filed.
    #[must_use]
    pub fn filing_date(&self) -> NaiveDate {
        self.filing_date
    }

    /// End of the reporting period.
    #[must_use]
    pub fn period_end(&self) -> NaiveDate {
        self.period_end
    }

    /// Whether this is the most current filing for the period.
    #[must_use]
    pub fn is_most_current(&self) -> bool {
        self.is_most_current
    }

    /// Name of the filing entity.
    #[must_use]
    pub fn entity_name(&self) -> &str {
        &self.entity_name
    }

    /// URL of the source document.
    #[must_use]
    pub fn entry_url(&self) -> &str {
        &self.entry_url
    }

    /// The loaded statement of the given type, if any.
    #[must_use]
    pub fn statement(&self, statement_type: StatementType) -> Option<&FinancialStatement> {
        self.statements.get(&statement_type)
    }

    /// Loads one statement of this report: resolves the presentation
    /// network, loads its concepts, pages through the report's facts, and
    /// stores the result.
    ///
    /// Every recoverable condition (unsupported statement type, no network,
    /// no concepts) skips with a log entry instead of failing, so one
    /// report's gaps never abort processing of its siblings.
    pub async fn load_statement(
        &mut self,
        gateway: &impl Gateway,
        statement_type: StatementType,
    ) {
        info!(entity = %self.entity_name, year = self.fiscal_year, %statement_type, "loading statement");

        let network_id = match find_statement_network(gateway, self.dts_id, statement_type).await {
            NetworkLookup::Found(network_id) => network_id,
            NetworkLookup::NotFound => {
                warn!(report_id = %self.report_id, %statement_type, "no presentation network, skipping statement");
                return;
            }
            NetworkLookup::Unsupported => {
                warn!(%statement_type, "statement type not supported, skipping");
                return;
            }
        };

        let concepts = load_concepts(gateway, self.dts_id, network_id).await;
        if concepts.is_empty() {
            warn!(report_id = %self.report_id, %network_id, "no concepts loaded, skipping statement");
            return;
        }

        let facts = load_facts(gateway, self.report_id).await;

        let mut statement = FinancialStatement::new(statement_type);
        statement.add_concepts(concepts);
        statement.add_facts(facts);
        info!(
            report_id = %self.report_id,
            concepts = statement.concepts.len(),
            facts = statement.facts.len(),
            "statement loaded"
        );
        self.statements.insert(statement_type, statement);
    }
}

/// A company and its filed reports, keyed by fiscal year.
#[derive(Debug, Clone)]
pub struct Company {
    ticker: Ticker,
    reports: HashMap<i32, Report>,
}

impl Company {
    /// Creates a company with no reports loaded.
    #[must_use]
    pub fn new(ticker: Ticker) -> Self {
        Self {
            ticker,
            reports: HashMap::new(),
        }
    }

    /// The company's ticker symbol.
    #[must_use]
    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    /// Number of loaded reports.
    #[must_use]
    pub fn len(&self) -> usize {
        self.reports.len()
    }

    /// Whether any reports are loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    /// The report for one fiscal year, if loaded.
    #[must_use]
    pub fn report_for_year(&self, fiscal_year: i32) -> Option<&Report> {
        self.reports.get(&fiscal_year)
    }

    /// Iterates the loaded reports.
    pub fn reports(&self) -> impl Iterator<Item = &Report> {
        self.reports.values()
    }

    /// Iterates the loaded reports mutably.
    pub fn reports_mut(&mut self) -> impl Iterator<Item = &mut Report> {
        self.reports.values_mut()
    }

    /// Searches for the company's 10-K reports in the given fiscal years and
    /// stores one [`Report`] per returned row, keyed by fiscal year.
    ///
    /// Returns the number of reports now loaded. Search or decode failures
    /// propagate; the caller decides whether sibling companies continue.
    pub async fn load_annual_reports(
        &mut self,
        gateway: &impl Gateway,
        years: &[i32],
    ) -> Result<usize> {
        let year_focus = years
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let fields = format!(
            "{},report.limit({})",
            REPORT_FIELDS.join(","),
            years.len()
        );
        let params = [
            ("entity.ticker".to_string(), self.ticker.to_string()),
            (
                "report.document-type".to_string(),
                DOCUMENT_TYPE_10K.to_string(),
            ),
            ("report.year-focus".to_string(), year_focus),
            ("fields".to_string(), fields),
        ];

        let records: Vec<ReportRecord> =
            decode_envelope(gateway.get("report/search", &params).await?)?;
        info!(ticker = %self.ticker, count = records.len(), "loaded 10-K reports");

        for record in records {
            let report = Report::from(record);
            self.reports.insert(report.fiscal_year, report);
        }
        Ok(self.reports.len())
    }
}
