// Copyright 2022 VMware, Inc.
// SPDX-License-Identifier: MIT
use crate::error::Error;
use k8s_openapi::api::policy::v1 as policyv1;
use serde_json::Value;
use tracing::*;

pub const LAST_APPLIED_ANNOTATION: &str = "anvil.dev/last-applied";

/// Writes the serialized spec into the last-applied annotation of pdb, replacing any
/// previous snapshot. Must run before the object is sent to the backend.
pub fn annotate(
    pdb: &mut policyv1::PodDisruptionBudget,
    spec: &policyv1::PodDisruptionBudgetSpec,
) -> Result<(), Error> {
    let snapshot = serde_json::to_string(spec).map_err(Error::SerializationFailed)?;
    pdb.metadata
        .annotations
        .get_or_insert_with(Default::default)
        .insert(LAST_APPLIED_ANNOTATION.to_string(), snapshot);
    Ok(())
}

pub fn last_applied_raw(pdb: &policyv1::PodDisruptionBudget) -> Option<&String> {
    pdb.metadata
        .annotations
        .as_ref()
        .and_then(|annotations| annotations.get(LAST_APPLIED_ANNOTATION))
}

/// Parsed snapshot, or None if the object has none or it cannot be parsed.
pub fn last_applied(pdb: &policyv1::PodDisruptionBudget) -> Option<Value> {
    let raw = last_applied_raw(pdb)?;
    match serde_json::from_str(raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(
                name = pdb.metadata.name.as_deref().unwrap_or_default(),
                error = %e,
                "Ignoring unreadable last-applied snapshot"
            );
            None
        }
    }
}
