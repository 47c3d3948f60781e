//! Unused-resource audit
//!
//! Three independent checks over inventory snapshots. Each is a pure
//! function over the listings so the inclusion rules are testable without a
//! provider.

use std::collections::HashSet;

use crate::provider::{AddressSummary, ResourceId, SnapshotSummary, VolumeSummary};

/// Volumes sitting unattached ("available" rather than "in-use").
pub fn unattached_volumes(volumes: &[VolumeSummary]) -> Vec<&VolumeSummary> {
    volumes.iter().filter(|v| v.state == "available").collect()
}

/// Ids of volumes currently attached somewhere.
pub fn in_use_volume_ids(volumes: &[VolumeSummary]) -> HashSet<ResourceId> {
    volumes
        .iter()
        .filter(|v| v.state == "in-use")
        .map(|v| v.id.clone())
        .collect()
}

/// Snapshots whose source volume is not currently in use.
///
/// Matching is by volume id string only: a snapshot whose source volume was
/// deleted and the id later reused by an unrelated volume is kept out of
/// this list. A snapshot with no source-volume reference is always unused.
pub fn unused_snapshots<'a>(
    snapshots: &'a [SnapshotSummary],
    in_use: &HashSet<ResourceId>,
) -> Vec<&'a SnapshotSummary> {
    snapshots
        .iter()
        .filter(|snap| {
            snap.source_volume_id
                .as_ref()
                .map(|id| !in_use.contains(id))
                .unwrap_or(true)
        })
        .collect()
}

/// Addresses lacking both an attached instance and an attached network
/// interface.
pub fn unassociated_addresses(addresses: &[AddressSummary]) -> Vec<&AddressSummary> {
    addresses
        .iter()
        .filter(|a| a.instance_id.is_none() && a.network_interface_id.is_none())
        .collect()
}
