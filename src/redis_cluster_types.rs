// Copyright 2022 VMware, Inc.
// SPDX-License-Identifier: MIT
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(CustomResource, Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[kube(group = "anvil.dev", version = "v1", kind = "RedisCluster")]
#[kube(shortname = "rdc", namespaced)]
pub struct RedisClusterSpec {
    #[serde(rename = "clusterSize")]
    pub cluster_size: u32,
    #[serde(rename = "redisLeader", default)]
    pub redis_leader: RedisRoleSpec,
    #[serde(rename = "redisFollower", default)]
    pub redis_follower: RedisRoleSpec,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct RedisRoleSpec {
    #[serde(rename = "podDisruptionBudget", skip_serializing_if = "Option::is_none")]
    pub pod_disruption_budget: Option<RedisPodDisruptionBudget>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct RedisPodDisruptionBudget {
    #[serde(default)]
    pub enabled: bool,
    #[serde(rename = "minAvailable", skip_serializing_if = "Option::is_none")]
    pub min_available: Option<u32>,
    #[serde(rename = "maxUnavailable", skip_serializing_if = "Option::is_none")]
    pub max_unavailable: Option<u32>,
}

/// The two members of a Redis cluster that each get their own disruption budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedisRole {
    Leader,
    Follower,
}

impl RedisRole {
    pub const ALL: [RedisRole; 2] = [RedisRole::Leader, RedisRole::Follower];

    pub fn as_str(&self) -> &'static str {
        match self {
            RedisRole::Leader => "leader",
            RedisRole::Follower => "follower",
        }
    }
}

impl std::fmt::Display for RedisRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl RedisClusterSpec {
    pub fn role_spec(&self, role: RedisRole) -> &RedisRoleSpec {
        match role {
            RedisRole::Leader => &self.redis_leader,
            RedisRole::Follower => &self.redis_follower,
        }
    }
}
