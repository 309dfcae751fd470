// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Custom resource types.

pub mod policy;

pub use policy::{Policy, PolicySpec, PolicyStatus, Validity};
