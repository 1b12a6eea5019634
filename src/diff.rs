// Copyright 2022 VMware, Inc.
// SPDX-License-Identifier: MIT
use crate::common::ObjectKey;
use crate::desired_state::*;
use crate::error::Error;
use crate::last_applied::*;
use k8s_openapi::api::policy::v1 as policyv1;
use serde_json::{Map, Value};

/// Whether the merged object differs from the live one in anything this controller governs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatchResult {
    pub is_empty: bool,
}

/// Computes the object to send when updating live towards desired.
///
/// The candidate starts as the object a create would send, takes the backend-owned
/// metadata from live, keeps every annotation live carries that the candidate lacks,
/// and gets a fresh last-applied snapshot of the desired spec. The bounds and the
/// selector always come from desired as a whole. Any other spec key is merged three
/// ways, anchored on live's previous snapshot: keys the previous snapshot owned but
/// desired dropped are removed, and anything else on live (written by users or other
/// controllers) is kept.
pub fn diff(
    live: &policyv1::PodDisruptionBudget,
    desired: &DesiredPolicy,
    key: &ObjectKey,
) -> Result<(policyv1::PodDisruptionBudget, PatchResult), Error> {
    let mut candidate = render(desired, key);
    let desired_spec = candidate.spec.clone().unwrap_or_default();

    // Backend-owned; never regenerated.
    candidate.metadata.resource_version = live.metadata.resource_version.clone();
    candidate.metadata.creation_timestamp = live.metadata.creation_timestamp.clone();
    candidate.metadata.managed_fields = live.metadata.managed_fields.clone();

    merge_annotations(&mut candidate, live);
    annotate(&mut candidate, &desired_spec)?;

    let desired_value = serde_json::to_value(&desired_spec).map_err(Error::SerializationFailed)?;
    let live_value = match &live.spec {
        Some(spec) => serde_json::to_value(spec).map_err(Error::SerializationFailed)?,
        None => Value::Object(Map::new()),
    };
    // Without a snapshot nothing on live can be told apart from what we wrote before.
    let base = last_applied(live).unwrap_or_else(|| live_value.clone());
    let merged_value = three_way_merge(&base, &desired_value, &live_value);
    let mut merged_spec: policyv1::PodDisruptionBudgetSpec =
        serde_json::from_value(merged_value).map_err(Error::SerializationFailed)?;
    // Owned outright: at most one bound, and a selector matching exactly our pods.
    merged_spec.min_available = desired_spec.min_available;
    merged_spec.max_unavailable = desired_spec.max_unavailable;
    merged_spec.selector = desired_spec.selector;

    let is_empty = Some(&merged_spec) == live.spec.as_ref() && same_snapshot(live, &candidate);
    candidate.spec = Some(merged_spec);
    Ok((candidate, PatchResult { is_empty }))
}

/// Copies annotations present on live but absent from candidate.
pub fn merge_annotations(
    candidate: &mut policyv1::PodDisruptionBudget,
    live: &policyv1::PodDisruptionBudget,
) {
    if let Some(live_annotations) = &live.metadata.annotations {
        let annotations = candidate
            .metadata
            .annotations
            .get_or_insert_with(Default::default);
        for (key, value) in live_annotations {
            annotations
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
    }
}

pub fn three_way_merge(base: &Value, desired: &Value, live: &Value) -> Value {
    match (desired, live) {
        (Value::Object(desired_map), Value::Object(live_map)) => {
            let no_base = Map::new();
            let base_map = base.as_object().unwrap_or(&no_base);
            let mut merged = live_map.clone();
            for key in base_map.keys() {
                if !desired_map.contains_key(key) {
                    merged.remove(key);
                }
            }
            for (key, desired_value) in desired_map {
                let value = match live_map.get(key) {
                    Some(live_value) => three_way_merge(
                        base_map.get(key).unwrap_or(&Value::Null),
                        desired_value,
                        live_value,
                    ),
                    None => desired_value.clone(),
                };
                merged.insert(key.clone(), value);
            }
            Value::Object(merged)
        }
        _ => desired.clone(),
    }
}

fn same_snapshot(
    live: &policyv1::PodDisruptionBudget,
    candidate: &policyv1::PodDisruptionBudget,
) -> bool {
    match (last_applied(live), last_applied(candidate)) {
        (Some(old), Some(new)) => old == new,
        _ => false,
    }
}
