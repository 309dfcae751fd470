// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Polling helpers: fixed delays, removal confirmation and bounded waits

use crate::constants::wait::*;
use crate::error::{PolicyError, Result};
use kube::runtime::wait::Condition;
use kube::{Api, Resource};
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::debug;

/// How often to poll and when to give up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    pub interval: Duration,
    pub timeout: Duration,
}

impl PollConfig {
    pub const fn new(interval: Duration, timeout: Duration) -> Self {
        Self { interval, timeout }
    }

    /// Default policy for confirming a deleted object is gone
    pub const fn removal() -> Self {
        Self::new(
            Duration::from_secs(REMOVAL_POLL_INTERVAL_SECS),
            Duration::from_secs(REMOVAL_TIMEOUT_SECS),
        )
    }

    /// Default policy for waiting on the controller to report a Policy state
    pub const fn validity() -> Self {
        Self::new(
            Duration::from_secs(VALIDITY_POLL_INTERVAL_SECS),
            Duration::from_secs(VALIDITY_TIMEOUT_SECS),
        )
    }

    /// Default policy for waiting on the Policy CRD to be served
    pub const fn crd() -> Self {
        Self::new(
            Duration::from_secs(CRD_POLL_INTERVAL_SECS),
            Duration::from_secs(CRD_TIMEOUT_SECS),
        )
    }
}

/// Block for a fixed delay so that asynchronous controllers can catch up
pub async fn wait_before_test(delay: Duration) {
    debug!("Waiting {:?} before continuing", delay);
    sleep(delay).await;
}

/// Poll `name` until `check` yields a value, giving up after `poll.timeout`.
///
/// Errors from the API other than 404 abort the wait.
async fn poll_for<K, T, F>(api: &Api<K>, name: &str, poll: &PollConfig, mut check: F) -> Result<T>
where
    K: Resource + Clone + DeserializeOwned + Debug,
    F: FnMut(Option<K>) -> Option<T>,
{
    let deadline = Instant::now() + poll.timeout;

    loop {
        if let Some(found) = check(api.get_opt(name).await?) {
            return Ok(found);
        }

        if Instant::now() >= deadline {
            return Err(PolicyError::Timeout {
                what: format!("{}/{}", api.resource_url(), name),
                timeout: poll.timeout,
            });
        }

        debug!(
            "{}/{} does not match yet, polling again in {:?}",
            api.resource_url(),
            name,
            poll.interval
        );
        sleep(poll.interval).await;
    }
}

/// Poll `name` until `condition` matches the object (or its absence).
///
/// Returns the object observed on the matching poll.
pub async fn poll_until<K, C>(
    api: &Api<K>,
    name: &str,
    poll: &PollConfig,
    condition: C,
) -> Result<Option<K>>
where
    K: Resource + Clone + DeserializeOwned + Debug,
    C: Condition<K>,
{
    poll_for(api, name, poll, |current: Option<K>| {
        condition
            .matches_object(current.as_ref())
            .then_some(current)
    })
    .await
}

/// Poll until `name` exists and satisfies `predicate`, returning it
pub async fn await_object<K, P>(
    api: &Api<K>,
    name: &str,
    poll: &PollConfig,
    predicate: P,
) -> Result<K>
where
    K: Resource + Clone + DeserializeOwned + Debug,
    P: Fn(&K) -> bool,
{
    poll_for(api, name, poll, |current: Option<K>| {
        current.filter(|obj| predicate(obj))
    })
    .await
}

/// Poll until `name` can no longer be read
pub async fn ensure_item_removal<K>(api: &Api<K>, name: &str, poll: &PollConfig) -> Result<()>
where
    K: Resource + Clone + DeserializeOwned + Debug,
{
    poll_until(api, name, poll, |obj: Option<&K>| obj.is_none()).await?;
    Ok(())
}
