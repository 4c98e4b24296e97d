//! A shopping list exposed as a todo list.

use std::sync::Arc;

use log::{info, warn};

use crate::constants::{ICON_CART, ICON_CART_SHARED};
use crate::coordinator::SyncCoordinator;
use crate::display::{parse_display_name, to_display_name};
use crate::error::ApiError;
use crate::models::{ItemUpdate, NewItem};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoItemStatus {
    NeedsAction,
    Completed,
}

/// One row of the todo list as the host displays it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    pub uid: String,
    pub summary: String,
    pub status: TodoItemStatus,
}

pub struct ShoppingListEntity {
    coordinator: Arc<SyncCoordinator>,
    list_id: String,
    name: String,
    shared: bool,
}

impl ShoppingListEntity {
    pub fn new(coordinator: Arc<SyncCoordinator>, list_id: &str, name: &str, shared: bool) -> Self {
        Self {
            coordinator,
            list_id: list_id.to_string(),
            name: name.to_string(),
            shared,
        }
    }

    pub fn unique_id(&self) -> String {
        format!("smartshopr_list_{}", self.list_id)
    }

    pub fn list_id(&self) -> &str {
        &self.list_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn icon(&self) -> &'static str {
        if self.shared {
            ICON_CART_SHARED
        } else {
            ICON_CART
        }
    }

    pub fn available(&self) -> bool {
        self.coordinator.last_update_success()
    }

    /// Items of this list in the current snapshot. Empty if the list is gone.
    pub fn todo_items(&self) -> Vec<TodoItem> {
        let Some(snapshot) = self.coordinator.snapshot() else {
            return Vec::new();
        };
        let Some(list) = snapshot.list(&self.list_id) else {
            return Vec::new();
        };

        list.items
            .iter()
            .map(|item| TodoItem {
                uid: item.id.clone(),
                summary: to_display_name(item),
                status: if item.is_completed {
                    TodoItemStatus::Completed
                } else {
                    TodoItemStatus::NeedsAction
                },
            })
            .collect()
    }

    /// Add an item from free text such as `"2 Milk"` or `"Milk x2"`.
    pub async fn create_todo_item(&self, summary: &str) -> Result<(), ApiError> {
        let parsed = parse_display_name(summary);
        info!("Adding '{}' x{} to list '{}'", parsed.name, parsed.quantity_value, self.name);
        self.coordinator
            .api()
            .add_item(&self.list_id, &NewItem::new(parsed.name, parsed.quantity_value))
            .await?;
        self.refresh_after_change().await;
        Ok(())
    }

    /// Push the item's completion state to the service.
    pub async fn update_todo_item(&self, item: &TodoItem) -> Result<(), ApiError> {
        let update = ItemUpdate::completed(item.status == TodoItemStatus::Completed);
        self.coordinator.api().update_item(&item.uid, &update).await?;
        self.refresh_after_change().await;
        Ok(())
    }

    pub async fn delete_todo_items(&self, uids: &[String]) -> Result<(), ApiError> {
        for uid in uids {
            if !self.coordinator.api().delete_item(uid).await? {
                warn!("Service did not confirm deletion of item {uid}");
            }
        }
        self.refresh_after_change().await;
        Ok(())
    }

    // The mutation itself succeeded; a failed refresh shows up as unavailability.
    async fn refresh_after_change(&self) {
        if let Err(e) = self.coordinator.request_refresh().await {
            warn!("Refresh after change to list '{}' failed: {e}", self.name);
        }
    }
}
