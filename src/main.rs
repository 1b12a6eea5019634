// Copyright 2022 VMware, Inc.
// SPDX-License-Identifier: MIT
use anyhow::Result;
use kube::{Client, CustomResourceExt};
use redis_pdb_controller::controller::run;
use redis_pdb_controller::redis_cluster_types::RedisCluster;
use std::env;
use tracing::*;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    let cmd = args.get(1).cloned().unwrap_or_default();
    if cmd == String::from("export") {
        info!("exporting custom resource definition");
        println!("{}", serde_yaml::to_string(&RedisCluster::crd())?);
    } else if cmd == String::from("run") {
        info!("running redis-pdb-controller");
        let client = Client::try_default().await?;
        run(client).await;
        info!("controller terminated");
    } else {
        warn!("wrong command; please use \"export\" or \"run\"");
    }
    Ok(())
}
