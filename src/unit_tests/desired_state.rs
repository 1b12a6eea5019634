// Copyright 2022 VMware, Inc.
// SPDX-License-Identifier: MIT
use crate::common::*;
use crate::desired_state::*;
use crate::error::Error;
use crate::redis_cluster_types::*;
use crate::unit_tests::{enabled_pdb, make_cluster};
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;

#[test]
pub fn test_quorum() {
    assert_eq!(quorum(1), 1);
    assert_eq!(quorum(3), 2);
    assert_eq!(quorum(4), 3);
    assert_eq!(quorum(6), 4);
}

#[test]
pub fn test_build_applies_quorum_default() {
    let desired = build(&make_cluster(4, Some(enabled_pdb(None, None))), RedisRole::Leader);
    assert!(desired.enabled);
    assert_eq!(desired.cluster_size, 4);
    assert_eq!(desired.min_available, Some(3));
    assert_eq!(desired.max_unavailable, None);
}

#[test]
pub fn test_build_copies_user_bound() {
    let rdc = make_cluster(5, Some(enabled_pdb(None, Some(1))));
    let desired = build(&rdc, RedisRole::Leader);
    assert_eq!(desired.min_available, None);
    assert_eq!(desired.max_unavailable, Some(1));

    let rdc = make_cluster(5, Some(enabled_pdb(Some(4), None)));
    let desired = build(&rdc, RedisRole::Leader);
    assert_eq!(desired.min_available, Some(4));
    assert_eq!(desired.max_unavailable, None);
}

#[test]
pub fn test_build_disabled_has_no_default() {
    let rdc = make_cluster(3, Some(RedisPodDisruptionBudget::default()));
    let desired = build(&rdc, RedisRole::Leader);
    assert!(!desired.enabled);
    assert_eq!(desired.min_available, None);

    // No podDisruptionBudget block at all.
    let desired = build(&rdc, RedisRole::Follower);
    assert!(!desired.enabled);
    assert_eq!(desired.min_available, None);
    assert_eq!(desired.max_unavailable, None);
}

#[test]
pub fn test_build_never_sets_both_bounds() {
    let rdc = make_cluster(3, Some(enabled_pdb(Some(2), Some(1))));
    let desired = build(&rdc, RedisRole::Leader);
    assert_eq!(desired.min_available, Some(2));
    assert_eq!(desired.max_unavailable, None);
    assert!(matches!(
        validate(&rdc, RedisRole::Leader),
        Err(Error::ConflictingBounds(role)) if role == "leader"
    ));
    assert!(validate(&rdc, RedisRole::Follower).is_ok());
}

#[test]
pub fn test_build_selector_labels() {
    let desired = build(&make_cluster(3, Some(enabled_pdb(None, None))), RedisRole::Leader);
    assert_eq!(desired.selector_labels, selector_labels("redis", RedisRole::Leader));
    assert_eq!(desired.selector_labels.get("role"), Some(&"leader".to_string()));
}

#[test]
pub fn test_render() {
    let rdc = make_cluster(3, Some(enabled_pdb(None, None)));
    let desired = build(&rdc, RedisRole::Leader);
    let pdb = render(&desired, &pdb_key(&rdc, RedisRole::Leader));
    assert_eq!(pdb.metadata.name, Some("redis-leader".to_string()));
    assert_eq!(pdb.metadata.namespace, Some("default".to_string()));
    assert!(pdb.metadata.owner_references.is_some());
    let spec = pdb.spec.unwrap();
    assert_eq!(spec.min_available, Some(IntOrString::Int(2)));
    assert_eq!(spec.max_unavailable, None);
    assert_eq!(
        spec.selector.unwrap().match_labels,
        Some(selector_labels("redis", RedisRole::Leader))
    );
}
