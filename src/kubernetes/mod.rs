// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes utilities for client creation, CRD discovery, and namespace management.

pub mod client;
pub mod crd;
pub mod namespaces;

pub use client::connect;
pub use crd::{policy_crd_available, wait_for_policy_crd};
pub use namespaces::{delete_namespace, ensure_namespace_exists};
