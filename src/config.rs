// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Intrasearch-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Intrasearch and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Runtime configuration: built-in defaults, then environment (`.env` honoured), then flags.

use std::path::PathBuf;

use crate::api::DEFAULT_BASE_URL;
use crate::model::{EmbeddingId, IdError};

pub const ENV_URL: &str = "INTRASEARCH_URL";
pub const ENV_LOG_FILE: &str = "INTRASEARCH_LOG_FILE";

/// Values given on the command line. `None` means the flag was absent.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CliOverrides {
    pub url: Option<String>,
    pub log_file: Option<String>,
    pub embedding: Option<String>,
    pub query: Option<String>,
    pub limit: Option<usize>,
    pub list: bool,
    pub demo: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Interactive,
    /// Print the document listing and exit.
    List,
    /// Run one query and print the working set.
    Query { query: String, limit: Option<usize> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    pub log_file: Option<PathBuf>,
    /// Document to select on start.
    pub embedding: Option<EmbeddingId>,
    pub mode: Mode,
    /// Serve built-in results instead of talking to a server.
    pub demo: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid embedding id: {0}")]
    Embedding(#[from] IdError),
    #[error("--query needs --embedding")]
    QueryWithoutEmbedding,
    #[error("--limit only applies to --query")]
    LimitWithoutQuery,
    #[error("--list cannot be combined with --query")]
    ListWithQuery,
    #[error("--demo cannot be combined with --url")]
    DemoWithUrl,
}

impl Config {
    /// Resolves against the process environment, after loading `.env` if present.
    pub fn load(cli: CliOverrides) -> Result<Self, ConfigError> {
        let _ = dotenv::dotenv();
        Self::resolve(cli, |key| dotenv::var(key).ok())
    }

    /// Resolves with an explicit environment lookup.
    pub fn resolve(
        cli: CliOverrides,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if cli.demo && cli.url.is_some() {
            return Err(ConfigError::DemoWithUrl);
        }

        let mode = match (cli.list, cli.query) {
            (true, Some(_)) => return Err(ConfigError::ListWithQuery),
            (true, None) => Mode::List,
            (false, Some(query)) => {
                if cli.embedding.is_none() {
                    return Err(ConfigError::QueryWithoutEmbedding);
                }
                Mode::Query { query, limit: cli.limit }
            }
            (false, None) => Mode::Interactive,
        };
        if cli.limit.is_some() && !matches!(mode, Mode::Query { .. }) {
            return Err(ConfigError::LimitWithoutQuery);
        }

        let base_url = cli
            .url
            .or_else(|| env(ENV_URL).filter(|value| !value.trim().is_empty()))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        let log_file = cli
            .log_file
            .or_else(|| env(ENV_LOG_FILE).filter(|value| !value.trim().is_empty()))
            .map(PathBuf::from);
        let embedding = cli.embedding.map(EmbeddingId::new).transpose()?;

        Ok(Self { base_url, log_file, embedding, mode, demo: cli.demo })
    }
}
