// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::status::{REASON_ADDED_OR_UPDATED, STATE_VALID};
use crate::error::{PolicyError, Result};
use kube::CustomResource;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Spec of an NGINX `Policy`.
///
/// Each policy kind is kept as an untyped document; only the fields the
/// helpers read are typed. Keys that are not known here end up in `extra`
/// so that a manifest round-trips to the API server unchanged.
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[kube(
    group = "k8s.nginx.org",
    version = "v1",
    kind = "Policy",
    plural = "policies"
)]
#[kube(namespaced)]
#[kube(status = "PolicyStatus")]
#[serde(rename_all = "camelCase")]
pub struct PolicySpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingress_class_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_control: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_limit: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jwt: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub basic_auth: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<Value>,
    #[serde(rename = "ingressMTLS", skip_serializing_if = "Option::is_none")]
    pub ingress_mtls: Option<Value>,
    #[serde(rename = "egressMTLS", skip_serializing_if = "Option::is_none")]
    pub egress_mtls: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oidc: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waf: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache: Option<Value>,
    #[serde(flatten)]
    #[schemars(skip)]
    pub extra: BTreeMap<String, Value>,
}

impl PolicySpec {
    /// Names of the policy kinds set in this spec, in manifest spelling
    pub fn kinds(&self) -> Vec<&'static str> {
        [
            ("accessControl", self.access_control.is_some()),
            ("rateLimit", self.rate_limit.is_some()),
            ("jwt", self.jwt.is_some()),
            ("basicAuth", self.basic_auth.is_some()),
            ("apiKey", self.api_key.is_some()),
            ("ingressMTLS", self.ingress_mtls.is_some()),
            ("egressMTLS", self.egress_mtls.is_some()),
            ("oidc", self.oidc.is_some()),
            ("waf", self.waf.is_some()),
            ("cache", self.cache.is_some()),
        ]
        .into_iter()
        .filter_map(|(kind, set)| set.then_some(kind))
        .collect()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PolicyStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl PolicyStatus {
    pub fn state(&self) -> Result<&str> {
        self.state
            .as_deref()
            .ok_or(PolicyError::MissingField("status.state"))
    }

    pub fn reason(&self) -> Result<&str> {
        self.reason
            .as_deref()
            .ok_or(PolicyError::MissingField("status.reason"))
    }

    pub fn validity(&self) -> Validity {
        let Ok(state) = self.state() else {
            return Validity::Pending;
        };
        let reason = self.reason.as_deref().unwrap_or_default();

        if state == STATE_VALID && reason == REASON_ADDED_OR_UPDATED {
            Validity::Valid
        } else {
            Validity::Invalid {
                state: state.to_string(),
                reason: reason.to_string(),
                message: self.message.clone(),
            }
        }
    }
}

/// How far the controller got with a Policy
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Validity {
    /// The controller has not reported a state yet
    Pending,
    Valid,
    Invalid {
        state: String,
        reason: String,
        message: Option<String>,
    },
}

impl Validity {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validity::Valid)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Validity::Pending)
    }
}

impl Policy {
    pub fn validity(&self) -> Validity {
        self.status
            .as_ref()
            .map_or(Validity::Pending, PolicyStatus::validity)
    }
}
