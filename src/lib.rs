// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
pub mod config;
pub mod constants;
pub mod error;
pub mod harness;
pub mod kubernetes;
pub mod manifest;
pub mod policies;
pub mod types;
pub mod wait;

#[cfg(test)]
mod test_utils;

pub use error::{PolicyError, Result};
pub use policies::{
    apply_and_assert_valid_policy, apply_and_await_valid_policy, await_policy_valid,
    create_policy_from_yaml, delete_policy, delete_policy_with, read_custom_resource, read_policy,
};
pub use types::{Policy, PolicySpec, PolicyStatus, Validity};
