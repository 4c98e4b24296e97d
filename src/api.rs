//! Typed operations on top of the [`Transport`].
//!
//! Each call unwraps its response envelope (`lists`, `items`, `item`,
//! `success`, `budgets`) into the models from [`crate::models`].

use std::sync::Arc;

use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;
use crate::models::{
    Budget, BudgetsEnvelope, ExpenseSummary, ItemEnvelope, ItemUpdate, ItemsEnvelope, ListItem, ListsEnvelope,
    NewItem, ShoppingList, SuccessEnvelope,
};
use crate::transport::{Method, Transport};

/// Outcome of checking a credential against the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialStatus {
    Valid,
    /// The service answered 401.
    Rejected,
    /// Some other failure; the credential is presumed valid.
    Indeterminate { reason: String },
}

impl CredentialStatus {
    /// Everything except a confirmed rejection is accepted.
    pub fn is_accepted(&self) -> bool {
        !matches!(self, Self::Rejected)
    }
}

/// Client for the SmartShopr Home Assistant API.
#[derive(Clone)]
pub struct SmartShoprApi {
    transport: Arc<dyn Transport>,
}

impl SmartShoprApi {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    async fn call<T: DeserializeOwned>(&self, method: Method, endpoint: &str, body: Option<Value>) -> Result<T, ApiError> {
        let value = self.transport.request(method, endpoint, body).await?;
        serde_json::from_value(value).map_err(|e| ApiError::api(format!("Invalid response from {endpoint}: {e}")))
    }

    /// Fetch the lists once and classify the outcome.
    pub async fn validate_credential(&self) -> CredentialStatus {
        match self.list_lists().await {
            Ok(_) => CredentialStatus::Valid,
            Err(ApiError::Auth) => CredentialStatus::Rejected,
            Err(err) => {
                warn!("Credential check inconclusive: {err}");
                CredentialStatus::Indeterminate {
                    reason: err.to_string(),
                }
            }
        }
    }

    // Lists

    pub async fn list_lists(&self) -> Result<Vec<ShoppingList>, ApiError> {
        let envelope: ListsEnvelope = self.call(Method::GET, "lists", None).await?;
        Ok(envelope.lists)
    }

    pub async fn list_items(&self, list_id: &str) -> Result<Vec<ListItem>, ApiError> {
        let envelope: ItemsEnvelope = self.call(Method::GET, &format!("lists/{list_id}/items"), None).await?;
        Ok(envelope.items)
    }

    // Items

    /// Add an item. Returns the created item when the service echoes it back.
    pub async fn add_item(&self, list_id: &str, item: &NewItem) -> Result<Option<ListItem>, ApiError> {
        debug!("Adding '{}' x{} to list {list_id}", item.name, item.quantity_value);
        let body = serde_json::to_value(item).map_err(|e| ApiError::api(format!("Failed to encode item: {e}")))?;
        let envelope: ItemEnvelope = self
            .call(Method::POST, &format!("lists/{list_id}/items"), Some(body))
            .await?;
        Ok(envelope.item)
    }

    pub async fn update_item(&self, item_id: &str, update: &ItemUpdate) -> Result<Option<ListItem>, ApiError> {
        let body = serde_json::to_value(update).map_err(|e| ApiError::api(format!("Failed to encode update: {e}")))?;
        let envelope: ItemEnvelope = self.call(Method::PATCH, &format!("items/{item_id}"), Some(body)).await?;
        Ok(envelope.item)
    }

    /// Delete an item, returning the service's success flag.
    pub async fn delete_item(&self, item_id: &str) -> Result<bool, ApiError> {
        let envelope: SuccessEnvelope = self.call(Method::DELETE, &format!("items/{item_id}"), None).await?;
        Ok(envelope.success)
    }

    // Budgets

    pub async fn list_budgets(&self) -> Result<Vec<Budget>, ApiError> {
        let envelope: BudgetsEnvelope = self.call(Method::GET, "budgets", None).await?;
        Ok(envelope.budgets)
    }

    // Expenses

    pub async fn get_monthly_expenses(&self) -> Result<ExpenseSummary, ApiError> {
        self.call(Method::GET, "expenses/month", None).await
    }
}
