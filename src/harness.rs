// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Scaffolding for tests that run against a live cluster.

use crate::config::Config;
use crate::kubernetes::{connect, delete_namespace, ensure_namespace_exists, wait_for_policy_crd};
use anyhow::{Context, Result};
use rand::{distributions::Alphanumeric, Rng};
use std::future::Future;
use tokio::task::JoinError;
use tracing::Instrument;

/// Runs a test in a freshly created namespace that is deleted afterwards.
///
/// Setup and cleanup failures are returned as errors; a panic inside the
/// test is re-raised after the namespace deletion was attempted, even if that
/// deletion failed.
pub async fn with_temp_ns<F, Fut>(config: &Config, test: F) -> Result<()>
where
    F: FnOnce(kube::Client, String) -> Fut,
    Fut: Future<Output = ()> + Send + 'static,
{
    let _tracing = init_tracing();

    let client = connect(config.kube_context.as_deref())
        .await
        .context("failed to initialize k8s client")?;
    wait_for_policy_crd(&client, &config.crd)
        .await
        .context("Policy CRD is not installed")?;

    let namespace = format!("policy-suite-{}", random_suffix(6));
    tracing::debug!(%namespace, "creating");
    ensure_namespace_exists(&client, &namespace)
        .await
        .with_context(|| format!("failed to create namespace {}", namespace))?;

    let res = tokio::spawn(
        test(client.clone(), namespace.clone()).instrument(tracing::info_span!("test", %namespace)),
    )
    .await;

    tracing::debug!(%namespace, "deleting");
    let cleanup = delete_namespace(&client, &namespace, &config.removal)
        .await
        .with_context(|| format!("failed to delete namespace {}", namespace));

    finish(res, cleanup)
}

/// Combine the test outcome with the cleanup outcome; a test panic wins
fn finish(res: std::result::Result<(), JoinError>, cleanup: Result<()>) -> Result<()> {
    match res {
        Err(err) if err.is_panic() => {
            if let Err(e) = cleanup {
                tracing::error!("{:#}", e);
            }
            std::panic::resume_unwind(err.into_panic())
        }
        Err(err) => {
            cleanup?;
            Err(err).context("test task was cancelled")
        }
        Ok(()) => cleanup,
    }
}

/// A random lowercase alphanumeric string of `len` characters
pub fn random_suffix(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect()
}

/// Install a test-scoped subscriber; events go to the captured test output
pub fn init_tracing() -> tracing::subscriber::DefaultGuard {
    tracing::subscriber::set_default(
        tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("policy_suite=debug,info")),
            )
            .finish(),
    )
}
