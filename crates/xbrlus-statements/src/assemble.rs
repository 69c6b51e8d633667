//! Joining concepts and facts into a presentation-ordered table.

use polars::prelude::*;
use tracing::debug;

use xbrlus_core::{Result, XbrlError};

use crate::records::{ConceptRecord, FactRecord};

/// One row of the assembled statement table: a concept row joined with the
/// fact reported for it, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct StatementLine {
    /// The concept/relationship row.
    pub concept: ConceptRecord,
    /// The matched fact row; `None` when no fact was reported.
    pub fact: Option<FactRecord>,
}

/// Left-joins concepts onto deduplicated facts by concept id and sorts the
/// result into presentation-tree traversal order (tree sequence, then tree
/// depth, both ascending).
///
/// Either input being empty yields an empty result; assembly never fails.
/// The output is deterministic for identical inputs.
#[must_use]
pub fn assemble(concepts: &[ConceptRecord], facts: &[FactRecord]) -> Vec<StatementLine> {
    if concepts.is_empty() || facts.is_empty() {
        debug!(
            concepts = concepts.len(),
            facts = facts.len(),
            "concepts or facts missing, skipping assembly"
        );
        return Vec::new();
    }

    let mut unique: Vec<&FactRecord> = Vec::new();
    for fact in facts {
        if !unique.iter().any(|f| *f == fact) {
            unique.push(fact);
        }
    }

    let mut lines = Vec::new();
    for concept in concepts {
        let mut matched = false;
        for fact in &unique {
            if fact.concept_id == concept.target_concept_id {
                matched = true;
                lines.push(StatementLine {
                    concept: concept.clone(),
                    fact: Some((*fact).clone()),
                });
            }
        }
        if !matched {
            lines.push(StatementLine {
                concept: concept.clone(),
                fact: None,
            });
        }
    }

    // Stable sort, so result order is reproducible across runs.
    lines.sort_by_key(|line| (line.concept.tree_sequence, line.concept.tree_depth));
    lines
}

/// Converts assembled statement lines into a polars `DataFrame`.
pub fn to_dataframe(lines: &[StatementLine]) -> Result<DataFrame> {
    let concept_ids: Vec<i64> = lines
        .iter()
        .map(|l| l.concept.target_concept_id.get())
        .collect();
    let names: Vec<&str> = lines.iter().map(|l| l.concept.target_name.as_str()).collect();
    let labels: Vec<Option<&str>> = lines
        .iter()
        .map(|l| l.concept.preferred_label.as_deref())
        .collect();
    let depths: Vec<i64> = lines.iter().map(|l| l.concept.tree_depth).collect();
    let sequences: Vec<i64> = lines.iter().map(|l| l.concept.tree_sequence).collect();
    let values: Vec<Option<&str>> = lines
        .iter()
        .map(|l| l.fact.as_ref().map(|f| f.value.as_str()))
        .collect();
    let units: Vec<Option<&str>> = lines
        .iter()
        .map(|l| l.fact.as_ref().and_then(|f| f.unit.as_deref()))
        .collect();
    let fiscal_years: Vec<Option<i32>> = lines
        .iter()
        .map(|l| l.fact.as_ref().and_then(|f| f.fiscal_year))
        .collect();
    let fiscal_periods: Vec<Option<&str>> = lines
        .iter()
        .map(|l| l.fact.as_ref().and_then(|f| f.fiscal_period.as_deref()))
        .collect();

    DataFrame::new(vec![
        Column::new("concept.id".into(), concept_ids),
        Column::new("concept.local-name".into(), names),
        Column::new("preferred-label".into(), labels),
        Column::new("tree-depth".into(), depths),
        Column::new("tree-sequence".into(), sequences),
        Column::new("fact.value".into(), values),
        Column::new("unit".into(), units),
        Column::new("fiscal-year".into(), fiscal_years),
        Column::new("fiscal-period".into(), fiscal_periods),
    ])
    .map_err(|e| XbrlError::Decode(e.to_string()))
}

/// Converts raw concept rows into a polars `DataFrame`.
pub fn concepts_to_dataframe(concepts: &[ConceptRecord]) -> Result<DataFrame> {
    DataFrame::new(vec![
        Column::new(
            "relationship.target-concept-id".into(),
            concepts
                .iter()
                .map(|c| c.target_concept_id.get())
                .collect::<Vec<i64>>(),
        ),
        Column::new(
            "relationship.source-name".into(),
            concepts
                .iter()
                .map(|c| c.source_name.as_deref())
                .collect::<Vec<Option<&str>>>(),
        ),
        Column::new(
            "relationship.target-name".into(),
            concepts
                .iter()
                .map(|c| c.target_name.as_str())
                .collect::<Vec<&str>>(),
        ),
        Column::new(
            "relationship.target-namespace".into(),
            concepts
                .iter()
                .map(|c| c.target_namespace.as_deref())
                .collect::<Vec<Option<&str>>>(),
        ),
        Column::new(
            "relationship.preferred-label".into(),
            concepts
                .iter()
                .map(|c| c.preferred_label.as_deref())
                .collect::<Vec<Option<&str>>>(),
        ),
        Column::new(
            "relationship.tree-depth".into(),
            concepts.iter().map(|c| c.tree_depth).collect::<Vec<i64>>(),
        ),
        Column::new(
            "relationship.tree-sequence".into(),
            concepts
                .iter()
                .map(|c| c.tree_sequence)
                .collect::<Vec<i64>>(),
        ),
    ])
    .map_err(|e| XbrlError::Decode(e.to_string()))
}

/// Converts raw fact rows into a polars `DataFrame`.
pub fn facts_to_dataframe(facts: &[FactRecord]) -> Result<DataFrame> {
    DataFrame::new(vec![
        Column::new(
            "fact.value".into(),
            facts.iter().map(|f| f.value.as_str()).collect::<Vec<&str>>(),
        ),
        Column::new(
            "concept.id".into(),
            facts.iter().map(|f| f.concept_id.get()).collect::<Vec<i64>>(),
        ),
        Column::new(
            "concept.is-base".into(),
            facts.iter().map(|f| f.is_base).collect::<Vec<bool>>(),
        ),
        Column::new(
            "concept.local-name".into(),
            facts
                .iter()
                .map(|f| f.local_name.as_str())
                .collect::<Vec<&str>>(),
        ),
        Column::new(
            "dimensions.count".into(),
            facts.iter().map(|f| f.dimensions_count).collect::<Vec<i64>>(),
        ),
        Column::new(
            "period.fiscal-year".into(),
            facts.iter().map(|f| f.fiscal_year).collect::<Vec<Option<i32>>>(),
        ),
        Column::new(
            "period.fiscal-period".into(),
            facts
                .iter()
                .map(|f| f.fiscal_period.as_deref())
                .collect::<Vec<Option<&str>>>(),
        ),
        Column::new(
            "unit.local-name".into(),
            facts.iter().map(|f| f.unit.as_deref()).collect::<Vec<Option<&str>>>(),
        ),
        Column::new(
            "dimension.local-name".into(),
            facts
                .iter()
                .map(|f| f.dimension.as_deref())
                .collect::<Vec<Option<&str>>>(),
        ),
        Column::new(
            "member.local-name".into(),
            facts
                .iter()
                .map(|f| f.member.as_deref())
                .collect::<Vec<Option<&str>>>(),
        ),
        Column::new(
            "report.acceptedtimestamp".into(),
            facts
                .iter()
                .map(|f| f.accepted.as_deref())
                .collect::<Vec<Option<&str>>>(),
        ),
    ])
    .map_err(|e| XbrlError::Decode(e.to_string()))
}
