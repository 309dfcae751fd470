// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Policy CRD availability checking

use crate::constants::policy::{GROUP, KIND, PLURAL, VERSION};
use crate::error::{PolicyError, Result};
use crate::wait::PollConfig;
use kube::{discovery::Discovery, Client};
use tokio::time::{sleep, Instant};
use tracing::{info, warn};

/// Wait for the Policy CRD to be served, giving up after `poll.timeout`.
pub async fn wait_for_policy_crd(client: &Client, poll: &PollConfig) -> Result<()> {
    let deadline = Instant::now() + poll.timeout;

    loop {
        match policy_crd_available(client).await {
            Ok(true) => {
                info!("Policy CRD ({}/{}) is available", GROUP, VERSION);
                return Ok(());
            }
            Ok(false) => {
                info!(
                    "Policy CRD ({}/{}) not yet available, waiting {:?}...",
                    GROUP, VERSION, poll.interval
                );
            }
            Err(e) => {
                warn!(
                    "Error checking for Policy CRD: {}, retrying in {:?}...",
                    e, poll.interval
                );
            }
        }

        if Instant::now() >= deadline {
            return Err(PolicyError::Timeout {
                what: format!("{}/{} {} CRD", GROUP, VERSION, KIND),
                timeout: poll.timeout,
            });
        }

        sleep(poll.interval).await;
    }
}

/// Check if the Policy CRD is served by attempting to discover it.
pub async fn policy_crd_available(client: &Client) -> Result<bool> {
    let discovery = Discovery::new(client.clone())
        .filter(&[GROUP])
        .run()
        .await?;

    let found = discovery
        .groups()
        .filter(|group| group.name() == GROUP)
        .flat_map(|group| group.recommended_resources())
        .any(|(ar, _)| ar.kind == KIND && ar.version == VERSION && ar.plural == PLURAL);
    Ok(found)
}
