// Copyright 2022 VMware, Inc.
// SPDX-License-Identifier: MIT
use crate::redis_cluster_types::*;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::OwnerReference;
use kube::api::{ObjectMeta, Resource};
use std::collections::BTreeMap;

pub const SETUP_TYPE: &str = "cluster";

pub const MANAGED_ANNOTATION: &str = "anvil.dev/managed";

/// Name and namespace of the budget object being reconciled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectKey {
    pub namespace: String,
    pub name: String,
}

impl ObjectKey {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> ObjectKey {
        ObjectKey {
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// OwnerRelation names the object whose deletion should garbage-collect the budget.
/// It is plain metadata handed to the backend, not a handle to the owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerRelation {
    pub api_version: String,
    pub kind: String,
    pub name: String,
    pub uid: String,
}

impl OwnerRelation {
    /// Returns None when the cluster has not been persisted yet (no uid).
    pub fn of(rdc: &RedisCluster) -> Option<OwnerRelation> {
        Some(OwnerRelation {
            api_version: RedisCluster::api_version(&()).to_string(),
            kind: RedisCluster::kind(&()).to_string(),
            name: rdc.metadata.name.clone()?,
            uid: rdc.metadata.uid.clone()?,
        })
    }

    pub fn to_owner_reference(&self) -> OwnerReference {
        OwnerReference {
            api_version: self.api_version.clone(),
            kind: self.kind.clone(),
            name: self.name.clone(),
            uid: self.uid.clone(),
            controller: Some(true),
            block_owner_deletion: Some(true),
        }
    }
}

pub fn cluster_name(rdc: &RedisCluster) -> String {
    rdc.metadata.name.clone().unwrap_or_default()
}

pub fn pdb_name(rdc: &RedisCluster, role: RedisRole) -> String {
    format!("{}-{}", cluster_name(rdc), role)
}

pub fn pdb_key(rdc: &RedisCluster, role: RedisRole) -> ObjectKey {
    ObjectKey::new(
        rdc.metadata.namespace.clone().unwrap_or_default(),
        pdb_name(rdc, role),
    )
}

pub fn redis_labels(name: &str, role: RedisRole) -> BTreeMap<String, String> {
    BTreeMap::from([
        ("app".to_string(), name.to_string()),
        ("redis_setup_type".to_string(), SETUP_TYPE.to_string()),
        ("role".to_string(), role.to_string()),
    ])
}

pub fn selector_labels(name: &str, role: RedisRole) -> BTreeMap<String, String> {
    BTreeMap::from([
        ("app".to_string(), name.to_string()),
        ("role".to_string(), role.to_string()),
    ])
}

pub fn managed_annotations() -> BTreeMap<String, String> {
    BTreeMap::from([(MANAGED_ANNOTATION.to_string(), "true".to_string())])
}

/// Metadata attached to every budget this controller writes: name, namespace,
/// labels, annotations and the owner reference back to the RedisCluster.
pub fn make_pdb_meta(rdc: &RedisCluster, role: RedisRole) -> ObjectMeta {
    let name = cluster_name(rdc);
    ObjectMeta {
        name: Some(pdb_name(rdc, role)),
        namespace: rdc.metadata.namespace.clone(),
        labels: Some(redis_labels(&name, role)),
        annotations: Some(managed_annotations()),
        owner_references: OwnerRelation::of(rdc).map(|owner| vec![owner.to_owner_reference()]),
        ..ObjectMeta::default()
    }
}
