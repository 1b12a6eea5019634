// Copyright 2022 VMware, Inc.
// SPDX-License-Identifier: MIT
use crate::common::*;
use crate::error::Error;
use crate::redis_cluster_types::*;
use k8s_openapi::api::policy::v1 as policyv1;
use k8s_openapi::apimachinery::pkg::apis::meta::v1 as metav1;
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use kube::api::ObjectMeta;
use std::collections::BTreeMap;

/// The disruption budget one role of a cluster should have, recomputed every tick.
#[derive(Debug, Clone, PartialEq)]
pub struct DesiredPolicy {
    pub enabled: bool,
    pub min_available: Option<u32>,
    pub max_unavailable: Option<u32>,
    pub cluster_size: u32,
    pub selector_labels: BTreeMap<String, String>,
    /// Opaque metadata (labels, annotations, owner reference) attached on write.
    pub metadata: ObjectMeta,
}

/// Majority of the cluster: floor(n/2) + 1.
pub fn quorum(cluster_size: u32) -> u32 {
    cluster_size / 2 + 1
}

/// Rejects a role spec that sets both bounds; such a budget has no single meaning.
pub fn validate(rdc: &RedisCluster, role: RedisRole) -> Result<(), Error> {
    match &rdc.spec.role_spec(role).pod_disruption_budget {
        Some(RedisPodDisruptionBudget {
            min_available: Some(_),
            max_unavailable: Some(_),
            ..
        }) => Err(Error::ConflictingBounds(role.to_string())),
        _ => Ok(()),
    }
}

pub fn build(rdc: &RedisCluster, role: RedisRole) -> DesiredPolicy {
    let params = rdc
        .spec
        .role_spec(role)
        .pod_disruption_budget
        .clone()
        .unwrap_or_default();
    let cluster_size = rdc.spec.cluster_size;

    let (mut min_available, max_unavailable) = match (params.min_available, params.max_unavailable) {
        (Some(min), _) => (Some(min), None),
        (None, max) => (None, max),
    };
    // If we don't have a value for either, assume quorum
    if params.enabled && min_available.is_none() && max_unavailable.is_none() {
        min_available = Some(quorum(cluster_size));
    }

    DesiredPolicy {
        enabled: params.enabled,
        min_available,
        max_unavailable,
        cluster_size,
        selector_labels: selector_labels(&cluster_name(rdc), role),
        metadata: make_pdb_meta(rdc, role),
    }
}

fn int_bound(value: u32) -> IntOrString {
    IntOrString::Int(i32::try_from(value).unwrap_or(i32::MAX))
}

pub fn render_spec(desired: &DesiredPolicy) -> policyv1::PodDisruptionBudgetSpec {
    policyv1::PodDisruptionBudgetSpec {
        min_available: desired.min_available.map(int_bound),
        max_unavailable: desired.max_unavailable.map(int_bound),
        selector: Some(metav1::LabelSelector {
            match_labels: Some(desired.selector_labels.clone()),
            ..metav1::LabelSelector::default()
        }),
        ..policyv1::PodDisruptionBudgetSpec::default()
    }
}

/// The object a fresh create would send. The diff engine starts from the same object.
pub fn render(desired: &DesiredPolicy, key: &ObjectKey) -> policyv1::PodDisruptionBudget {
    policyv1::PodDisruptionBudget {
        metadata: ObjectMeta {
            name: Some(key.name.clone()),
            namespace: Some(key.namespace.clone()),
            ..desired.metadata.clone()
        },
        spec: Some(render_spec(desired)),
        ..policyv1::PodDisruptionBudget::default()
    }
}
