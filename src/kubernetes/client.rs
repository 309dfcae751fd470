// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Client creation for the cluster under test

use crate::error::{PolicyError, Result};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config as KConfig};
use tracing::{debug, info, instrument};

/// Create a Kubernetes client for the cluster under test.
///
/// Without a context the in-cluster or default kubeconfig settings are
/// inferred. With a context, that entry of the local kubeconfig is used.
#[instrument]
pub async fn connect(context: Option<&str>) -> Result<Client> {
    let config = match context {
        None => KConfig::infer()
            .await
            .map_err(|e| PolicyError::KubeconfigError(format!("Failed to infer config: {}", e)))?,
        Some(context) => config_for_context(context).await?,
    };

    info!("Connecting to cluster at {}", config.cluster_url);

    Client::try_from(config)
        .map_err(|e| PolicyError::KubeconfigError(format!("Failed to create client: {}", e)))
}

async fn config_for_context(context: &str) -> Result<KConfig> {
    let kubeconfig = Kubeconfig::read()
        .map_err(|e| PolicyError::KubeconfigError(format!("Failed to read kubeconfig: {}", e)))?;

    if !kubeconfig.contexts.iter().any(|c| c.name == context) {
        return Err(PolicyError::KubeconfigError(format!(
            "Context '{}' not found in kubeconfig",
            context
        )));
    }

    debug!("Using kubeconfig context '{}'", context);

    let options = KubeConfigOptions {
        context: Some(context.to_string()),
        ..Default::default()
    };
    KConfig::from_custom_kubeconfig(kubeconfig, &options)
        .await
        .map_err(|e| PolicyError::KubeconfigError(format!("Failed to create config: {}", e)))
}
