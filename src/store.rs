// Copyright 2022 VMware, Inc.
// SPDX-License-Identifier: MIT
use crate::error::StoreError;
use async_trait::async_trait;
use k8s_openapi::api::policy::v1 as policyv1;
use kube::{
    api::{Api, DeleteParams, PostParams},
    Client,
};

/// The backend holding disruption budgets. Each call is exactly one round trip.
#[async_trait]
pub trait ClusterStateStore: Send + Sync {
    async fn get(&self, namespace: &str, name: &str)
        -> Result<policyv1::PodDisruptionBudget, StoreError>;

    async fn create(
        &self,
        namespace: &str,
        pdb: &policyv1::PodDisruptionBudget,
    ) -> Result<(), StoreError>;

    /// Replaces the object; pdb must carry the resourceVersion last observed by get.
    async fn update(
        &self,
        namespace: &str,
        pdb: &policyv1::PodDisruptionBudget,
    ) -> Result<(), StoreError>;

    async fn delete(&self, namespace: &str, name: &str) -> Result<(), StoreError>;
}

/// Tells "not found" and stale-version conflicts apart from every other API failure.
pub fn classify(error: kube_client::Error) -> StoreError {
    let reason = match &error {
        kube_client::Error::Api(kube_core::ErrorResponse { reason, .. }) => reason.clone(),
        _ => String::new(),
    };
    match reason.as_str() {
        "NotFound" => StoreError::NotFound,
        "Conflict" => StoreError::Conflict(error),
        _ => StoreError::Backend(error),
    }
}

/// ClusterStateStore backed by the Kubernetes API.
#[derive(Clone)]
pub struct KubeStore {
    client: Client,
}

impl KubeStore {
    pub fn new(client: Client) -> KubeStore {
        KubeStore { client }
    }

    fn api(&self, namespace: &str) -> Api<policyv1::PodDisruptionBudget> {
        Api::<policyv1::PodDisruptionBudget>::namespaced(self.client.clone(), namespace)
    }
}

#[async_trait]
impl ClusterStateStore for KubeStore {
    async fn get(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<policyv1::PodDisruptionBudget, StoreError> {
        self.api(namespace).get(name).await.map_err(classify)
    }

    async fn create(
        &self,
        namespace: &str,
        pdb: &policyv1::PodDisruptionBudget,
    ) -> Result<(), StoreError> {
        self.api(namespace)
            .create(&PostParams::default(), pdb)
            .await
            .map(|_| ())
            .map_err(classify)
    }

    async fn update(
        &self,
        namespace: &str,
        pdb: &policyv1::PodDisruptionBudget,
    ) -> Result<(), StoreError> {
        let name = pdb.metadata.name.clone().unwrap_or_default();
        self.api(namespace)
            .replace(&name, &PostParams::default(), pdb)
            .await
            .map(|_| ())
            .map_err(classify)
    }

    async fn delete(&self, namespace: &str, name: &str) -> Result<(), StoreError> {
        self.api(namespace)
            .delete(name, &DeleteParams::default())
            .await
            .map(|_| ())
            .map_err(classify)
    }
}
