// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::wait::PollConfig;

/// Settings for running the suite against a cluster
#[derive(Debug, Clone)]
pub struct Config {
    /// Kubeconfig context to use; the current context when unset
    pub kube_context: Option<String>,
    /// Log full Policy status payloads before asserting on them
    pub debug: bool,
    pub removal: PollConfig,
    pub validity: PollConfig,
    pub crd: PollConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            kube_context: None,
            debug: false,
            removal: PollConfig::removal(),
            validity: PollConfig::validity(),
            crd: PollConfig::crd(),
        }
    }
}

impl Config {
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.kube_context = Some(context.into());
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_validity(mut self, validity: PollConfig) -> Self {
        self.validity = validity;
        self
    }
}
