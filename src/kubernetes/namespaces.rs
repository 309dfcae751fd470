// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Namespace management for test runs

use crate::constants::{FIELD_MANAGER, TEST_NAMESPACE_LABEL};
use crate::error::{PolicyError, Result};
use crate::wait::{ensure_item_removal, PollConfig};
use k8s_openapi::api::core::v1::Namespace;
use kube::{
    api::{DeleteParams, ObjectMeta, PostParams},
    Api, Client,
};
use std::collections::BTreeMap;
use tracing::{debug, info, instrument};

/// Ensure a namespace exists in the cluster, create if it doesn't
#[instrument(skip(client))]
pub async fn ensure_namespace_exists(client: &Client, namespace: &str) -> Result<()> {
    let namespaces: Api<Namespace> = Api::all(client.clone());

    match namespaces.get(namespace).await {
        Ok(_) => {
            debug!("Namespace {} already exists", namespace);
            Ok(())
        }
        Err(kube::Error::Api(err)) if err.code == 404 => {
            info!("Creating namespace {}", namespace);
            let ns = Namespace {
                metadata: ObjectMeta {
                    name: Some(namespace.to_string()),
                    labels: Some(BTreeMap::from([(
                        TEST_NAMESPACE_LABEL.to_string(),
                        "true".to_string(),
                    )])),
                    ..Default::default()
                },
                ..Default::default()
            };
            let pp = PostParams {
                field_manager: Some(FIELD_MANAGER.to_string()),
                ..Default::default()
            };
            namespaces.create(&pp, &ns).await?;
            info!("Namespace {} created successfully", namespace);
            Ok(())
        }
        Err(e) => Err(PolicyError::NamespaceError(format!(
            "Failed to check/create namespace {}: {}",
            namespace, e
        ))),
    }
}

/// Delete a namespace and wait until it is gone
#[instrument(skip(client, poll))]
pub async fn delete_namespace(client: &Client, namespace: &str, poll: &PollConfig) -> Result<()> {
    let namespaces: Api<Namespace> = Api::all(client.clone());

    info!("Deleting namespace {}", namespace);
    namespaces
        .delete(namespace, &DeleteParams::background())
        .await
        .map_err(|e| {
            PolicyError::NamespaceError(format!("Failed to delete namespace {}: {}", namespace, e))
        })?;

    ensure_item_removal(&namespaces, namespace, poll).await?;
    info!("Namespace {} was removed", namespace);
    Ok(())
}
