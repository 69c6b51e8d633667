//! Presentation network resolution.
//!
//! A filing renders each statement through a presentation network; filers
//! label the same statement under several role-description variants, so
//! resolution searches the known variants and ranks the candidates.

use tracing::{debug, info, warn};

use xbrlus_core::{DtsId, Gateway, NetworkId, StatementType, decode_envelope};

use crate::records::NetworkRecord;

/// Link name identifying presentation networks in relationship searches.
pub const PRESENTATION_LINK_NAME: &str = "presentationLink";

/// Outcome of resolving a statement type to a presentation network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkLookup {
    /// A presentation network was found.
    Found(NetworkId),
    /// No candidate network matched, or the search failed.
    NotFound,
    /// No role descriptions are defined for the requested statement type.
    Unsupported,
}

/// Finds the presentation network id for a statement type within a filing.
///
/// Statement types without defined role descriptions return
/// [`NetworkLookup::Unsupported`] without touching the gateway. Search
/// failures are logged and reported as [`NetworkLookup::NotFound`];
/// resolution is never fatal to the caller.
pub async fn find_statement_network(
    gateway: &impl Gateway,
    dts_id: DtsId,
    statement_type: StatementType,
) -> NetworkLookup {
    let Some(roles) = statement_type.role_descriptions() else {
        warn!(%statement_type, "no role descriptions defined for statement type");
        return NetworkLookup::Unsupported;
    };

    let endpoint = format!("dts/{dts_id}/network/search");
    let params = [
        ("dts.id".to_string(), dts_id.to_string()),
        (
            "network.link-name".to_string(),
            PRESENTATION_LINK_NAME.to_string(),
        ),
        ("network.role-description".to_string(), roles.join(",")),
        (
            "fields".to_string(),
            "network.id,network.role-description".to_string(),
        ),
    ];

    let networks: Vec<NetworkRecord> = match gateway
        .get(&endpoint, &params)
        .await
        .and_then(decode_envelope)
    {
        Ok(networks) => networks,
        Err(e) => {
            warn!(%dts_id, %statement_type, error = %e, "network search failed");
            return NetworkLookup::NotFound;
        }
    };

    // Longer role descriptions are assumed more specific; ties keep the
    // first candidate in result order.
    let mut best: Option<&NetworkRecord> = None;
    for candidate in &networks {
        if best.is_none_or(|b| candidate.role_description.len() > b.role_description.len()) {
            best = Some(candidate);
        }
    }

    match best {
        Some(network) => {
            info!(
                %statement_type,
                network_id = %network.network_id,
                role = %network.role_description,
                "resolved presentation network"
            );
            NetworkLookup::Found(network.network_id)
        }
        None => {
            debug!(%dts_id, %statement_type, "no presentation network found");
            NetworkLookup::NotFound
        }
    }
}
