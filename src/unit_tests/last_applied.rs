// Copyright 2022 VMware, Inc.
// SPDX-License-Identifier: MIT
use crate::last_applied::*;
use k8s_openapi::api::policy::v1 as policyv1;
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use kube::api::ObjectMeta;
use std::collections::BTreeMap;

#[test]
pub fn test_annotate() {
    let spec = policyv1::PodDisruptionBudgetSpec {
        min_available: Some(IntOrString::Int(2)),
        ..Default::default()
    };
    let mut pdb = policyv1::PodDisruptionBudget::default();
    assert_eq!(last_applied(&pdb), None);

    annotate(&mut pdb, &spec).unwrap();
    assert_eq!(last_applied_raw(&pdb), Some(&"{\"minAvailable\":2}".to_string()));
    assert_eq!(last_applied(&pdb), Some(serde_json::json!({"minAvailable": 2})));
}

#[test]
pub fn test_annotate_overwrites_previous_snapshot() {
    let mut pdb = policyv1::PodDisruptionBudget {
        metadata: ObjectMeta {
            annotations: Some(BTreeMap::from([
                (LAST_APPLIED_ANNOTATION.to_string(), "{\"minAvailable\":5}".to_string()),
                ("team".to_string(), "payments".to_string()),
            ])),
            ..ObjectMeta::default()
        },
        ..Default::default()
    };
    let spec = policyv1::PodDisruptionBudgetSpec {
        max_unavailable: Some(IntOrString::Int(1)),
        ..Default::default()
    };
    annotate(&mut pdb, &spec).unwrap();
    let annotations = pdb.metadata.annotations.unwrap();
    assert_eq!(annotations.len(), 2);
    assert_eq!(annotations.get(LAST_APPLIED_ANNOTATION), Some(&"{\"maxUnavailable\":1}".to_string()));
}

#[test]
pub fn test_unreadable_snapshot_is_absent() {
    let pdb = policyv1::PodDisruptionBudget {
        metadata: ObjectMeta {
            annotations: Some(BTreeMap::from([(
                LAST_APPLIED_ANNOTATION.to_string(),
                "not json {".to_string(),
            )])),
            ..ObjectMeta::default()
        },
        ..Default::default()
    };
    assert!(last_applied_raw(&pdb).is_some());
    assert_eq!(last_applied(&pdb), None);
}
