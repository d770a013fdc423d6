//! # Application Context
//!
//! Everything a command needs, built once per invocation.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         AppContext                                      │
//! │                                                                         │
//! │  ┌──────────────────┐   ┌──────────────────────────────────────────┐   │
//! │  │  ClientConfig    │   │  ApiClient                               │   │
//! │  │                  │   │                                          │   │
//! │  │  base_url        │──►│  RestClient ── HyperTransport            │   │
//! │  │  timeout         │   │  Arc<SessionStore>                       │   │
//! │  │  session_path    │   │     └─ FileStorage(session.json)         │   │
//! │  └──────────────────┘   │        or MemoryStorage (--ephemeral)    │   │
//! │                         └──────────────────────────────────────────┘   │
//! │                                                                         │
//! │  The session is hydrated from storage when the client is built, so     │
//! │  `hisi login` in one invocation is visible to the next.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use hisi_client::{ApiClient, ClientConfig, FileStorage, MemoryStorage, SessionStorage, SessionStore};
use tracing::debug;

use crate::cli::GlobalArgs;

pub struct AppContext {
    pub config: ClientConfig,
    pub client: ApiClient,
    /// `--config` as given; `hisi config` resolves it the same way loading does.
    pub config_path: Option<PathBuf>,
}

impl AppContext {
    /// Loads config, applies command line overrides and hydrates the session.
    pub fn open(args: &GlobalArgs) -> anyhow::Result<Self> {
        let mut config =
            ClientConfig::load(args.config.clone()).context("Failed to load configuration")?;

        if let Some(url) = &args.api_url {
            config.api.base_url = url.clone();
            config.validate().context("Invalid --api-url")?;
        }

        let storage: Arc<dyn SessionStorage> = if args.ephemeral {
            debug!("Using in-memory session storage");
            Arc::new(MemoryStorage::new())
        } else {
            let path = config.session_path().context(
                "No location for the session file; set HISI_SESSION_PATH or pass --ephemeral",
            )?;
            debug!(?path, "Using session file");
            Arc::new(FileStorage::new(path))
        };

        let client = ApiClient::connect(&config, storage).context("Failed to create API client")?;
        debug!(base_url = %config.api.base_url, "Client ready");

        Ok(Self {
            config,
            client,
            config_path: args.config.clone(),
        })
    }

    /// Context around an existing client.
    pub fn with_client(config: ClientConfig, client: ApiClient) -> Self {
        Self {
            config,
            client,
            config_path: None,
        }
    }

    /// Points `hisi config` at an explicit file.
    pub fn with_config_path(mut self, path: PathBuf) -> Self {
        self.config_path = Some(path);
        self
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        self.client.session()
    }
}
