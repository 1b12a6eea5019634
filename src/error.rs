// Copyright 2022 VMware, Inc.
// SPDX-License-Identifier: MIT
use thiserror::Error;

/// Errors surfaced by a ClusterStateStore.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Object not found")]
    NotFound,
    /// The write carried a stale resourceVersion; re-fetch and retry.
    #[error("Conflicting write: {0}")]
    Conflict(#[source] kube::Error),
    #[error("Backend request failed: {0}")]
    Backend(#[source] kube::Error),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound)
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Conflict(_))
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to serialize last-applied snapshot: {0}")]
    SerializationFailed(#[source] serde_json::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Failed to get CR: {0}")]
    CRGetFailed(#[source] kube::Error),
    #[error("MissingObjectKey: {0}")]
    MissingObjectKey(&'static str),
    #[error("Both minAvailable and maxUnavailable are set for role {0}")]
    ConflictingBounds(String),
}

impl Error {
    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::Store(e) if e.is_conflict())
    }
}
