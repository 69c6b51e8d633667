//! Typed records for XBRL US query responses.
//!
//! One record type per endpoint response shape, with the API's dotted field
//! names mapped explicitly. Decoding fails when a required field is absent
//! rather than silently yielding an empty value.

use chrono::NaiveDate;
use serde::Deserialize;

use xbrlus_core::{ConceptId, DtsId, NetworkId, ReportId};

/// One row of a `report/search` response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReportRecord {
    /// Report identifier.
    #[serde(rename = "report.id")]
    pub report_id: ReportId,
    /// Document taxonomy set identifier.
    #[serde(rename = "dts.id")]
    pub dts_id: DtsId,
    /// Fiscal year the report focuses on.
    #[serde(rename = "report.year-focus", deserialize_with = "de::year")]
    pub fiscal_year: i32,
    /// Date the report was filed.
    #[serde(rename = "report.filing-date")]
    pub filing_date: NaiveDate,
    /// End of the reporting period.
    #[serde(rename = "report.period-end")]
    pub period_end: NaiveDate,
    /// Whether this is the most current filing for the period.
    #[serde(rename = "report.is-most-current")]
    pub is_most_current: bool,
    /// Name of the filing entity.
    #[serde(rename = "report.entity-name")]
    pub entity_name: String,
    /// URL of the source document.
    #[serde(rename = "report.entry-url")]
    pub entry_url: String,
}

/// One row of a network search response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NetworkRecord {
    /// Presentation network identifier.
    #[serde(rename = "network.id")]
    pub network_id: NetworkId,
    /// Human-readable role description of the network.
    #[serde(rename = "network.role-description")]
    pub role_description: String,
}

/// One row of a `relationship/search` response: a parent-child arc in a
/// presentation network.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConceptRecord {
    /// Identifier of the target concept.
    #[serde(rename = "relationship.target-concept-id")]
    pub target_concept_id: ConceptId,
    /// Local name of the source (parent) concept.
    #[serde(rename = "relationship.source-name", default)]
    pub source_name: Option<String>,
    /// Local name of the target concept.
    #[serde(rename = "relationship.target-name")]
    pub target_name: String,
    /// Namespace of the target concept.
    #[serde(rename = "relationship.target-namespace", default)]
    pub target_namespace: Option<String>,
    /// Preferred presentation label role.
    #[serde(rename = "relationship.preferred-label", default)]
    pub preferred_label: Option<String>,
    /// Depth of the target concept in the presentation tree.
    #[serde(rename = "relationship.tree-depth")]
    pub tree_depth: i64,
    /// Traversal sequence of the target concept; defines presentation order.
    #[serde(rename = "relationship.tree-sequence")]
    pub tree_sequence: i64,
}

/// One row of a `fact/search` response: a reported value for a concept,
/// period, and dimension combination.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FactRecord {
    /// The reported value, as the API renders it.
    #[serde(rename = "fact.value", deserialize_with = "de::value")]
    pub value: String,
    /// Identifier of the concept the value was reported for.
    #[serde(rename = "concept.id")]
    pub concept_id: ConceptId,
    /// Whether the concept comes from a base taxonomy.
    #[serde(rename = "concept.is-base")]
    pub is_base: bool,
    /// Local name of the concept.
    #[serde(rename = "concept.local-name")]
    pub local_name: String,
    /// Number of dimensions qualifying the fact.
    #[serde(rename = "dimensions.count")]
    pub dimensions_count: i64,
    /// Fiscal year of the reporting period.
    #[serde(rename = "period.fiscal-year", default)]
    pub fiscal_year: Option<i32>,
    /// Fiscal period of the reporting period (e.g. "Y", "Q1").
    #[serde(rename = "period.fiscal-period", default)]
    pub fiscal_period: Option<String>,
    /// Local name of the unit of measure.
    #[serde(rename = "unit.local-name", default)]
    pub unit: Option<String>,
    /// Local name of the qualifying dimension, if any.
    #[serde(rename = "dimension.local-name", default)]
    pub dimension: Option<String>,
    /// Local name of the dimension member, if any.
    #[serde(rename = "member.local-name", default)]
    pub member: Option<String>,
    /// Timestamp the containing report was accepted.
    #[serde(rename = "report.acceptedtimestamp", default)]
    pub accepted: Option<String>,
}

/// Deserializers tolerant of the API's loose scalar typing.
mod de {
    use serde::de::{Deserializer, Error, Unexpected};
    use serde::Deserialize;
    use serde_json::Value;

    /// Fact values arrive as strings or bare numbers depending on the
    /// concept; normalize to a string either way.
    pub(super) fn value<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(s),
            Value::Number(n) => Ok(n.to_string()),
            Value::Bool(b) => Ok(b.to_string()),
            Value::Null => Ok(String::new()),
            other => Err(Error::invalid_type(
                Unexpected::Other(&format!("{other}")),
                &"a string or number",
            )),
        }
    }

    /// Fiscal years arrive as numbers or numeric strings.
    pub(super) fn year<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Number(n) => n
                .as_i64()
                .map(|y| y as i32)
                .ok_or_else(|| Error::custom("fiscal year is not an integer")),
            Value::String(s) => s
                .parse()
                .map_err(|_| Error::custom(format!("fiscal year `{s}` is not an integer"))),
            other => Err(Error::custom(format!(
                "fiscal year has unexpected type: {other}"
            ))),
        }
    }
}
