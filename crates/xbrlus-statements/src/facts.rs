//! Paginated fact retrieval for one report.

use tracing::{debug, warn};

use xbrlus_core::{Gateway, ReportId, decode_envelope};

use crate::records::FactRecord;

/// Number of fact rows requested per page.
pub const PAGE_SIZE: usize = 100;

/// Fields requested per fact row, with the API's field-level sort directives.
const FACT_FIELDS: &[&str] = &[
    "fact.value",
    "concept.id.sort(ASC)",
    "concept.is-base",
    "concept.local-name",
    "dimensions.count.sort(ASC)",
    "period.fiscal-year.sort(DESC)",
    "period.fiscal-period",
    "unit.local-name",
    "dimension.local-name",
    "member.local-name",
    "report.acceptedtimestamp.sort(DESC)",
];

/// Loads all zero-dimension facts for a report, page by page.
///
/// The offset advances by [`PAGE_SIZE`] after each full page; an empty or
/// short page signals the end of data. A page failure aborts the loop early,
/// keeping whatever was accumulated (logged, non-fatal).
pub async fn load_facts(gateway: &impl Gateway, report_id: ReportId) -> Vec<FactRecord> {
    let mut facts = Vec::new();
    let mut offset = 0usize;

    loop {
        let fields = format!("{},fact.offset({offset})", FACT_FIELDS.join(","));
        let params = [
            ("report.id".to_string(), report_id.to_string()),
            ("dimensions.count".to_string(), "0".to_string()),
            ("fields".to_string(), fields),
        ];

        let page: Vec<FactRecord> = match gateway
            .get("fact/search?unique", &params)
            .await
            .and_then(decode_envelope)
        {
            Ok(page) => page,
            Err(e) => {
                warn!(%report_id, offset, error = %e, "fact page failed, keeping partial results");
                break;
            }
        };

        if page.is_empty() {
            break;
        }
        let last_page = page.len() < PAGE_SIZE;
        facts.extend(page);
        if last_page {
            break;
        }
        offset += PAGE_SIZE;
    }

    debug!(%report_id, count = facts.len(), "loaded facts");
    facts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockGateway;
    use serde_json::{Value, json};

    fn fact_row(concept_id: i64) -> Value {
        json!({
            "fact.value": "1000000",
            "concept.id": concept_id,
            "concept.is-base": true,
            "concept.local-name": "Revenues",
            "dimensions.count": 0,
            "period.fiscal-year": 2024,
            "period.fiscal-period": "Y",
            "unit.local-name": "USD",
            "report.acceptedtimestamp": "2025-01-28T12:00:00",
        })
    }

    fn page_of(len: usize) -> Value {
        let rows: Vec<Value> = (0..len as i64).map(fact_row).collect();
        json!({"data": rows})
    }

    fn offset_param(params: &[(String, String)]) -> String {
        let fields = params
            .iter()
            .find(|(k, _)| k == "fields")
            .map(|(_, v)| v.clone())
            .unwrap();
        fields
            .split(',')
            .find(|f| f.starts_with("fact.offset("))
            .unwrap()
            .to_string()
    }

    #[tokio::test]
    async fn pages_until_short_page() {
        let gateway = MockGateway::new();
        gateway.push_ok(page_of(100));
        gateway.push_ok(page_of(100));
        gateway.push_ok(page_of(37));

        let facts = load_facts(&gateway, 422569.into()).await;
        assert_eq!(facts.len(), 237);

        let calls = gateway.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(offset_param(&calls[0].1), "fact.offset(0)");
        assert_eq!(offset_param(&calls[1].1), "fact.offset(100)");
        assert_eq!(offset_param(&calls[2].1), "fact.offset(200)");
    }

    #[tokio::test]
    async fn empty_first_page_stops_immediately() {
        let gateway = MockGateway::new();
        gateway.push_ok(page_of(0));

        let facts = load_facts(&gateway, 1.into()).await;
        assert!(facts.is_empty());
        assert_eq!(gateway.calls().len(), 1);
    }

    #[tokio::test]
    async fn filters_to_zero_dimension_facts() {
        let gateway = MockGateway::new();
        gateway.push_ok(page_of(1));

        load_facts(&gateway, 1.into()).await;

        let calls = gateway.calls();
        let (endpoint, params) = &calls[0];
        assert_eq!(endpoint, "fact/search?unique");
        assert!(params.contains(&("dimensions.count".to_string(), "0".to_string())));
        assert!(params.contains(&("report.id".to_string(), "1".to_string())));
    }

    #[tokio::test]
    async fn page_failure_keeps_partial_results() {
        let gateway = MockGateway::new();
        gateway.push_ok(page_of(100));
        gateway.push_err(xbrlus_core::XbrlError::Network("timed out".to_string()));

        let facts = load_facts(&gateway, 1.into()).await;
        assert_eq!(facts.len(), 100);
        assert_eq!(gateway.calls().len(), 2);
    }
}
