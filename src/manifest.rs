// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Loading Policy manifests from YAML files

use crate::error::{PolicyError, Result};
use crate::types::Policy;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A Policy read from a manifest file
#[derive(Clone, Debug)]
pub struct PolicyManifest {
    name: String,
    policy: Policy,
}

impl PolicyManifest {
    /// Read and parse the manifest at `path`.
    ///
    /// The document must carry `metadata.name`; everything else is checked
    /// by the API server on create.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let contents = std::fs::read_to_string(&path).map_err(|source| PolicyError::ManifestRead {
            path: path.clone(),
            source,
        })?;
        Self::parse(path, &contents)
    }

    fn parse(path: PathBuf, contents: &str) -> Result<Self> {
        let document: serde_json::Value =
            serde_yaml::from_str(contents).map_err(|source| PolicyError::ManifestParse {
                path: path.clone(),
                source,
            })?;

        let name = document
            .get("metadata")
            .and_then(|m| m.get("name"))
            .and_then(|n| n.as_str())
            .filter(|n| !n.is_empty())
            .ok_or(PolicyError::MissingField("metadata.name"))?
            .to_string();

        let policy: Policy = serde_json::from_value(document).map_err(|source| {
            PolicyError::ManifestSchema {
                path: path.clone(),
                source,
            }
        })?;

        debug!("Loaded Policy manifest '{}' from {}", name, path.display());

        Ok(Self { name, policy })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }
}
