// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Helpers to create, read, verify and delete Policy resources in tests.

use crate::constants::wait::SETTLE_DELAY_SECS;
use crate::constants::FIELD_MANAGER;
use crate::error::{PolicyError, Result};
use crate::manifest::PolicyManifest;
use crate::types::{Policy, Validity};
use crate::wait::{await_object, ensure_item_removal, wait_before_test, PollConfig};
use kube::api::{DeleteParams, PostParams};
use kube::{Api, Client, Resource};
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use std::path::Path;
use std::time::Duration;
use tracing::{error, info, instrument};

/// Read a namespaced custom resource by name
pub async fn read_custom_resource<K>(client: &Client, namespace: &str, name: &str) -> Result<K>
where
    K: Resource<Scope = k8s_openapi::NamespaceResourceScope> + Clone + DeserializeOwned + Debug,
    K::DynamicType: Default,
{
    let api: Api<K> = Api::namespaced(client.clone(), namespace);
    Ok(api.get(name).await?)
}

/// Read a Policy resource
#[instrument(skip(client))]
pub async fn read_policy(client: &Client, namespace: &str, name: &str) -> Result<Policy> {
    read_custom_resource(client, namespace, name).await
}

/// Create a Policy from a YAML manifest and return its name.
///
/// The name comes from the manifest, not from the server response.
#[instrument(skip(client, manifest), fields(path = %manifest.as_ref().display()))]
pub async fn create_policy_from_yaml(
    client: &Client,
    manifest: impl AsRef<Path>,
    namespace: &str,
) -> Result<String> {
    info!("Create a Policy:");
    let manifest = PolicyManifest::load(manifest)?;
    let name = manifest.name().to_string();

    let policies: Api<Policy> = Api::namespaced(client.clone(), namespace);
    let pp = PostParams {
        field_manager: Some(FIELD_MANAGER.to_string()),
        ..Default::default()
    };

    match policies.create(&pp, manifest.policy()).await {
        Ok(_) => {
            info!("Policy created with name '{}'", name);
            Ok(name)
        }
        Err(e) => {
            error!("Exception occurred while creating Policy: {}: {}", name, e);
            Err(e.into())
        }
    }
}

/// Delete a Policy and wait until it is gone
pub async fn delete_policy(client: &Client, name: &str, namespace: &str) -> Result<()> {
    delete_policy_with(client, name, namespace, &PollConfig::removal()).await
}

/// Delete a Policy, confirming its removal with the given poll policy
#[instrument(skip(client, poll))]
pub async fn delete_policy_with(
    client: &Client,
    name: &str,
    namespace: &str,
    poll: &PollConfig,
) -> Result<()> {
    info!("Delete a Policy: {}", name);

    let policies: Api<Policy> = Api::namespaced(client.clone(), namespace);
    policies.delete(name, &DeleteParams::default()).await?;
    ensure_item_removal(&policies, name, poll).await?;

    info!("Policy was removed with name '{}'", name);
    Ok(())
}

/// Create a Policy, give the controller a moment, and assert it is valid.
///
/// The status is read exactly once after a fixed delay. A Policy that is not
/// `Valid`/`AddedOrUpdated` by then fails the calling test with a panic;
/// errors creating or reading the Policy are returned.
pub async fn apply_and_assert_valid_policy(
    client: &Client,
    namespace: &str,
    manifest: impl AsRef<Path>,
    debug: bool,
) -> Result<String> {
    let name = create_policy_from_yaml(client, manifest, namespace).await?;
    wait_before_test(Duration::from_secs(SETTLE_DELAY_SECS)).await;
    let policy = read_policy(client, namespace, &name).await?;

    if debug {
        info!("Policy '{}' info: {:?}", name, policy.status);
    }

    assert!(
        policy.validity().is_valid(),
        "Policy '{}' is not valid: {:?}",
        name,
        policy.status
    );

    Ok(name)
}

/// Poll a Policy until the controller reports a state for it.
///
/// Returns the Policy once it is valid, [`PolicyError::Rejected`] as soon as
/// it is reported invalid and [`PolicyError::Timeout`] if it stays pending.
#[instrument(skip(client, poll))]
pub async fn await_policy_valid(
    client: &Client,
    namespace: &str,
    name: &str,
    poll: &PollConfig,
) -> Result<Policy> {
    let policies: Api<Policy> = Api::namespaced(client.clone(), namespace);
    let policy = await_object(&policies, name, poll, |p: &Policy| {
        !p.validity().is_pending()
    })
    .await?;

    if let Validity::Invalid {
        state,
        reason,
        message,
    } = policy.validity()
    {
        return Err(PolicyError::Rejected {
            name: name.to_string(),
            state,
            reason,
            message,
        });
    }

    info!("Policy '{}' is valid", name);
    Ok(policy)
}

/// Create a Policy and wait, within `poll`, for the controller to accept it
pub async fn apply_and_await_valid_policy(
    client: &Client,
    namespace: &str,
    manifest: impl AsRef<Path>,
    poll: &PollConfig,
) -> Result<String> {
    let name = create_policy_from_yaml(client, manifest, namespace).await?;
    await_policy_valid(client, namespace, &name, poll).await?;
    Ok(name)
}
