// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PolicyError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Failed to read manifest {}: {source}", .path.display())]
    ManifestRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse manifest {}: {source}", .path.display())]
    ManifestParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Manifest {} is not a valid Policy: {source}", .path.display())]
    ManifestSchema {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Timed out after {timeout:?} waiting for {what}")]
    Timeout { what: String, timeout: Duration },

    #[error("Policy {name} was rejected: state={state}, reason={reason}, message={message:?}")]
    Rejected {
        name: String,
        state: String,
        reason: String,
        message: Option<String>,
    },

    #[error("Failed to load kubeconfig: {0}")]
    KubeconfigError(String),

    #[error("Namespace operation failed: {0}")]
    NamespaceError(String),
}

impl PolicyError {
    /// True when the API server answered 404 for the request
    pub fn is_not_found(&self) -> bool {
        matches!(self, PolicyError::KubeError(kube::Error::Api(err)) if err.code == 404)
    }
}

pub type Result<T> = std::result::Result<T, PolicyError>;
