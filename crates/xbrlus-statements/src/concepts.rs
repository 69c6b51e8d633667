//! Concept/relationship tree retrieval for a presentation network.

use tracing::{debug, warn};

use xbrlus_core::{DtsId, Gateway, NetworkId, decode_envelope};

use crate::records::ConceptRecord;

/// Arc role selecting parent-child relationships in a presentation network.
pub const PARENT_CHILD_ARCROLE: &str = "http://www.xbrl.org/2003/arcrole/parent-child";

/// Fields requested per relationship row; the trailing sort directive also
/// requests `relationship.target-name`.
const CONCEPT_FIELDS: &str = "relationship.target-concept-id,relationship.source-name,\
                              relationship.target-namespace,relationship.preferred-label,\
                              relationship.tree-depth,relationship.tree-sequence,\
                              relationship.target-name.sort(ASC)";

/// Loads the ordered concept/relationship rows of one presentation network.
///
/// Failures are logged and yield an empty sequence; concept loading is never
/// fatal to the caller.
pub async fn load_concepts(
    gateway: &impl Gateway,
    dts_id: DtsId,
    network_id: NetworkId,
) -> Vec<ConceptRecord> {
    let params = [
        ("dts.id".to_string(), dts_id.to_string()),
        ("network.id".to_string(), network_id.to_string()),
        (
            "network.arcrole-uri".to_string(),
            PARENT_CHILD_ARCROLE.to_string(),
        ),
        ("fields".to_string(), CONCEPT_FIELDS.to_string()),
    ];

    match gateway
        .get("relationship/search", &params)
        .await
        .and_then(decode_envelope)
    {
        Ok(concepts) => {
            debug!(%network_id, count = concepts.len(), "loaded concept relationships");
            concepts
        }
        Err(e) => {
            warn!(%dts_id, %network_id, error = %e, "relationship search failed");
            Vec::new()
        }
    }
}
