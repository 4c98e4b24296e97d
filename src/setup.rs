//! Setting up an account: credential check, first refresh and entity wiring.
//!
//! [`setup_entry`] builds the transport, facade and coordinator, runs the
//! startup refresh and returns an [`Integration`] that owns the periodic
//! refresh loop. Consumers receive the coordinator by handle.

use std::sync::Arc;

use log::{error, info};

use crate::api::{CredentialStatus, SmartShoprApi};
use crate::config::Config;
use crate::coordinator::{RefreshLoop, SyncCoordinator};
use crate::entities::Entities;
use crate::error::SetupError;
use crate::transport::{HttpTransport, Transport};

/// Identifier used to reject configuring the same account twice.
pub fn unique_id(api_key: &str) -> String {
    api_key.chars().take(16).collect()
}

/// Check a key before accepting it. Only a confirmed rejection fails; an
/// inconclusive check lets setup continue.
pub async fn validate_api_key(api: &SmartShoprApi) -> Result<(), SetupError> {
    match api.validate_credential().await {
        CredentialStatus::Valid => Ok(()),
        CredentialStatus::Indeterminate { reason } => {
            info!("Accepting API key despite failed check: {reason}");
            Ok(())
        }
        CredentialStatus::Rejected => Err(SetupError::InvalidAuth),
    }
}

/// A running integration for one account.
pub struct Integration {
    pub unique_id: String,
    pub coordinator: Arc<SyncCoordinator>,
    pub entities: Entities,
    refresh_loop: RefreshLoop,
}

impl Integration {
    /// Stop periodic refreshes. An in-flight refresh is allowed to finish.
    pub async fn unload(self) {
        self.refresh_loop.shutdown().await;
        info!("Unloaded SmartShopr entry {}", self.unique_id);
    }
}

/// Set up with the HTTP transport described by `config`. The key is checked
/// over the same transport before the first refresh.
pub async fn setup_entry(config: &Config, api_key: &str) -> Result<Integration, SetupError> {
    let transport: Arc<dyn Transport> = Arc::new(
        HttpTransport::with_timeout(&config.api.base_url, api_key, config.api.request_timeout())
            .map_err(|e| SetupError::Unknown(e.to_string()))?,
    );
    validate_api_key(&SmartShoprApi::new(Arc::clone(&transport))).await?;
    setup_with_transport(transport, config, unique_id(api_key)).await
}

/// Set up over any transport. Fails if the first refresh fails.
pub async fn setup_with_transport(
    transport: Arc<dyn Transport>,
    config: &Config,
    unique_id: String,
) -> Result<Integration, SetupError> {
    let api = SmartShoprApi::new(transport);
    let coordinator = Arc::new(SyncCoordinator::new(api, config.sync.scan_interval()));

    let snapshot = coordinator.first_refresh().await.map_err(|e| {
        error!("Initial refresh failed: {e}");
        SetupError::NotReady(e)
    })?;

    let entities = Entities::from_snapshot(&coordinator, &snapshot);
    info!(
        "Set up SmartShopr entry {unique_id} with {} entities, refreshing every {:?}",
        entities.count(),
        coordinator.update_interval()
    );
    let refresh_loop = coordinator.start();

    Ok(Integration {
        unique_id,
        coordinator,
        entities,
        refresh_loop,
    })
}
