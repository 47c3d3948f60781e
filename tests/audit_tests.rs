//! Unused-resource audit inclusion rules

use std::collections::HashSet;

use costctl::audit::{
    in_use_volume_ids, unassociated_addresses, unattached_volumes, unused_snapshots,
};
use costctl::provider::{AddressSummary, SnapshotSummary, VolumeSummary};

fn volume(id: &str, state: &str) -> VolumeSummary {
    VolumeSummary {
        id: id.to_string(),
        state: state.to_string(),
        size_gib: Some(50),
    }
}

fn snapshot(id: &str, source: Option<&str>) -> SnapshotSummary {
    SnapshotSummary {
        id: id.to_string(),
        source_volume_id: source.map(str::to_string),
    }
}

fn address(ip: &str, instance: Option<&str>, eni: Option<&str>) -> AddressSummary {
    AddressSummary {
        public_ip: ip.to_string(),
        instance_id: instance.map(str::to_string),
        network_interface_id: eni.map(str::to_string),
    }
}

#[test]
fn test_available_volume_is_unattached_in_use_is_not() {
    let volumes = vec![volume("vol-a", "available"), volume("vol-b", "in-use")];
    let unattached = unattached_volumes(&volumes);
    assert_eq!(unattached.len(), 1);
    assert_eq!(unattached[0].id, "vol-a");
}

#[test]
fn test_empty_inventory_yields_empty_audit() {
    assert!(unattached_volumes(&[]).is_empty());
    assert!(in_use_volume_ids(&[]).is_empty());
    assert!(unused_snapshots(&[], &HashSet::new()).is_empty());
    assert!(unassociated_addresses(&[]).is_empty());
}

#[test]
fn test_snapshot_of_in_use_volume_is_excluded() {
    let volumes = vec![volume("vol-live", "in-use"), volume("vol-idle", "available")];
    let in_use = in_use_volume_ids(&volumes);

    let snapshots = vec![
        snapshot("snap-live", Some("vol-live")),
        snapshot("snap-idle", Some("vol-idle")),
        snapshot("snap-deleted", Some("vol-gone")),
        snapshot("snap-orphan", None),
    ];
    let unused = unused_snapshots(&snapshots, &in_use);
    let ids: Vec<_> = unused.iter().map(|s| s.id.as_str()).collect();
    // Only the snapshot whose source is currently in use is excluded.
    assert_eq!(ids, vec!["snap-idle", "snap-deleted", "snap-orphan"]);
}

#[test]
fn test_snapshot_matching_reused_volume_id_is_kept_out() {
    // The association is by id string only: if the source volume was
    // deleted and the id reused by an unrelated in-use volume, the
    // snapshot is still treated as referenced.
    let in_use: HashSet<_> = ["vol-reused".to_string()].into_iter().collect();
    let snapshots = vec![snapshot("snap-stale", Some("vol-reused"))];
    assert!(unused_snapshots(&snapshots, &in_use).is_empty());
}

#[test]
fn test_address_with_instance_only_is_associated() {
    // An attached instance is enough, even with no network interface.
    let addresses = vec![address("198.51.100.1", Some("i-1"), None)];
    assert!(unassociated_addresses(&addresses).is_empty());
}

#[test]
fn test_address_with_interface_only_is_associated() {
    let addresses = vec![address("198.51.100.2", None, Some("eni-1"))];
    assert!(unassociated_addresses(&addresses).is_empty());
}

#[test]
fn test_address_with_neither_reference_is_unassociated() {
    let addresses = vec![
        address("198.51.100.3", None, None),
        address("198.51.100.4", Some("i-2"), Some("eni-2")),
    ];
    let unassociated = unassociated_addresses(&addresses);
    assert_eq!(unassociated.len(), 1);
    assert_eq!(unassociated[0].public_ip, "198.51.100.3");
}
