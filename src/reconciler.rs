// Copyright 2022 VMware, Inc.
// SPDX-License-Identifier: MIT
use crate::common::ObjectKey;
use crate::desired_state::*;
use crate::diff::diff;
use crate::error::{Error, StoreError};
use crate::last_applied::annotate;
use crate::store::ClusterStateStore;
use tracing::*;

/// What a single reconcile did to the budget object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Disabled and nothing exists.
    AlreadyAbsent,
    Created,
    Updated,
    /// Live object already matches desired.
    Unchanged,
    Deleted,
}

/// Drives one budget object towards its desired policy.
///
/// Each call fetches the live object, then issues at most one write. Errors from
/// the store, including conflicts on a stale resourceVersion, are returned as is;
/// retrying is left to the control loop that calls reconcile again.
pub struct PdbReconciler<S> {
    store: S,
}

impl<S: ClusterStateStore> PdbReconciler<S> {
    pub fn new(store: S) -> PdbReconciler<S> {
        PdbReconciler { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn reconcile(&self, desired: &DesiredPolicy, key: &ObjectKey) -> Result<Outcome, Error> {
        let result = self.reconcile_core(desired, key).await;
        match &result {
            Ok(outcome) => info!(
                namespace = %key.namespace,
                name = %key.name,
                outcome = ?outcome,
                "Reconciled PodDisruptionBudget"
            ),
            Err(err) => error!(
                namespace = %key.namespace,
                name = %key.name,
                error = err as &dyn std::error::Error,
                "Failed to reconcile PodDisruptionBudget"
            ),
        }
        result
    }

    async fn reconcile_core(&self, desired: &DesiredPolicy, key: &ObjectKey) -> Result<Outcome, Error> {
        let live = match self.store.get(&key.namespace, &key.name).await {
            Ok(pdb) => Some(pdb),
            Err(StoreError::NotFound) => None,
            Err(e) => return Err(e.into()),
        };

        match (live, desired.enabled) {
            (None, false) => Ok(Outcome::AlreadyAbsent),
            (None, true) => {
                let mut pdb = render(desired, key);
                let spec = pdb.spec.clone().unwrap_or_default();
                annotate(&mut pdb, &spec)?;
                self.store.create(&key.namespace, &pdb).await?;
                Ok(Outcome::Created)
            }
            // TODO: the object may be recreated by someone else between get and delete;
            // a delete precondition on the observed uid would close that window.
            (Some(_), false) => {
                self.store.delete(&key.namespace, &key.name).await?;
                Ok(Outcome::Deleted)
            }
            (Some(live), true) => {
                debug!(
                    name = %key.name,
                    resource_version = live.metadata.resource_version.as_deref().unwrap_or_default(),
                    "Current rv of PodDisruptionBudget"
                );
                let (merged, patch) = diff(&live, desired, key)?;
                if patch.is_empty {
                    return Ok(Outcome::Unchanged);
                }
                self.store.update(&key.namespace, &merged).await?;
                Ok(Outcome::Updated)
            }
        }
    }
}
