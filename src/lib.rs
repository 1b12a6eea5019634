// Copyright 2022 VMware, Inc.
// SPDX-License-Identifier: MIT
// Nightly clippy (0.1.64) considers Drop a side effect, see https://github.com/rust-lang/rust-clippy/issues/9608
#![allow(clippy::unnecessary_lazy_evaluations)]

pub mod common;
pub mod controller;
pub mod desired_state;
pub mod diff;
pub mod error;
pub mod last_applied;
pub mod reconciler;
pub mod redis_cluster_types;
pub mod store;
