// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Coordinates of the Policy custom resource
pub mod policy {
    pub const GROUP: &str = "k8s.nginx.org";
    pub const VERSION: &str = "v1";
    pub const KIND: &str = "Policy";
    pub const PLURAL: &str = "policies";
}

/// Status values written by the Policy controller
pub mod status {
    pub const STATE_VALID: &str = "Valid";
    pub const REASON_ADDED_OR_UPDATED: &str = "AddedOrUpdated";
}

/// The field manager recorded on objects this crate creates
pub const FIELD_MANAGER: &str = "policy-suite";

/// Label put on temporary test namespaces
pub const TEST_NAMESPACE_LABEL: &str = "policy-suite.k8s.nginx.org/test";

/// Polling defaults
pub mod wait {
    /// Fixed delay between creating a Policy and checking its status
    pub const SETTLE_DELAY_SECS: u64 = 1;
    pub const REMOVAL_POLL_INTERVAL_SECS: u64 = 1;
    pub const REMOVAL_TIMEOUT_SECS: u64 = 120;
    pub const VALIDITY_POLL_INTERVAL_SECS: u64 = 1;
    pub const VALIDITY_TIMEOUT_SECS: u64 = 30;
    pub const CRD_POLL_INTERVAL_SECS: u64 = 2;
    pub const CRD_TIMEOUT_SECS: u64 = 60;
}
