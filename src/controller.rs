// Copyright 2022 VMware, Inc.
// SPDX-License-Identifier: MIT
use crate::common::*;
use crate::desired_state::{build, validate};
use crate::error::Error;
use crate::reconciler::PdbReconciler;
use crate::redis_cluster_types::*;
use crate::store::KubeStore;
use futures::StreamExt;
use k8s_openapi::api::policy::v1 as policyv1;
use kube::{
    api::{Api, ListParams},
    runtime::{
        controller::{self, Action, Controller},
        reflector::ObjectRef,
    },
    Client, Resource,
};
use std::sync::Arc;
use tokio::time::Duration;
use tracing::*;

pub const REQUEUE_AFTER: Duration = Duration::from_secs(60);

pub const REQUEUE_AFTER_ERROR: Duration = Duration::from_secs(10);

// Data we want access to in error/reconcile calls
pub struct Data {
    pub client: Client,
    pub reconciler: PdbReconciler<KubeStore>,
}

impl Data {
    pub fn new(client: Client) -> Data {
        Data {
            reconciler: PdbReconciler::new(KubeStore::new(client.clone())),
            client,
        }
    }
}

/// Controller triggers this whenever a RedisCluster or one of its budgets changed
pub async fn reconcile(rdc_from_cache: Arc<RedisCluster>, ctx: Arc<Data>) -> Result<Action, Error> {
    let client = &ctx.client;

    let rdc_name = rdc_from_cache
        .metadata
        .name
        .as_ref()
        .ok_or_else(|| Error::MissingObjectKey(".metadata.name"))?;
    let rdc_ns = rdc_from_cache
        .metadata
        .namespace
        .as_ref()
        .ok_or_else(|| Error::MissingObjectKey(".metadata.namespace"))?;

    let rdc_api = Api::<RedisCluster>::namespaced(client.clone(), rdc_ns);

    // Get the RedisCluster custom resource before taking any reconciliation actions.
    let rdc = match rdc_api.get(rdc_name).await {
        Err(kube_client::Error::Api(kube_core::ErrorResponse { reason, .. }))
            if &reason == "NotFound" =>
        {
            info!("{} not found, end reconcile", rdc_name);
            return Ok(Action::await_change());
        }
        Err(e) => return Err(Error::CRGetFailed(e)),
        Ok(rdc) => rdc,
    };

    for role in RedisRole::ALL {
        validate(&rdc, role)?;
    }
    for role in RedisRole::ALL {
        let desired = build(&rdc, role);
        ctx.reconciler
            .reconcile(&desired, &pdb_key(&rdc, role))
            .await?;
    }

    Ok(Action::requeue(REQUEUE_AFTER))
}

/// The controller triggers this on reconcile errors
pub fn error_policy(_object: Arc<RedisCluster>, error: &Error, _ctx: Arc<Data>) -> Action {
    warn!("Reconcile failed due to error: {}", error);
    Action::requeue(REQUEUE_AFTER_ERROR)
}

pub fn report_controller_reconciled<K, QueueErr>(
    controller_name: &str,
    result: &Result<(ObjectRef<K>, Action), controller::Error<Error, QueueErr>>,
) where
    K: Resource,
    QueueErr: std::error::Error,
{
    match result {
        Ok((obj, _)) => {
            info!(
                controller.name = controller_name,
                object = %obj,
                "Reconciled object"
            );
        }
        Err(err) => {
            error!(
                controller.name = controller_name,
                error = err as &dyn std::error::Error,
                "Failed to reconcile object",
            );
        }
    }
}

pub async fn run(client: Client) {
    let rdc_api = Api::<RedisCluster>::all(client.clone());
    let pdb_api = Api::<policyv1::PodDisruptionBudget>::all(client.clone());

    Controller::new(rdc_api, ListParams::default())
        .owns(pdb_api, ListParams::default())
        .shutdown_on_signal()
        .run(reconcile, error_policy, Arc::new(Data::new(client)))
        .for_each(|res| async move { report_controller_reconciled("redis-pdb-controller", &res) })
        .await;
}
