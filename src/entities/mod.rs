//! Host-facing consumers of the coordinator's snapshot.
//!
//! Each entity holds a handle to the shared [`SyncCoordinator`] and reads the
//! current snapshot on demand. The set of entities is fixed from the first
//! snapshot, the same way the host registers them once at setup.

pub mod sensor;
pub mod todo_list;

use std::sync::Arc;

use crate::coordinator::SyncCoordinator;
use crate::models::Snapshot;

pub use sensor::{BudgetAttributes, BudgetSensor, ExpenseAttributes, MonthlyExpensesSensor};
pub use todo_list::{ShoppingListEntity, TodoItem, TodoItemStatus};

/// All entities built for one configured account.
pub struct Entities {
    pub lists: Vec<ShoppingListEntity>,
    pub monthly_expenses: MonthlyExpensesSensor,
    pub budgets: Vec<BudgetSensor>,
}

impl Entities {
    pub fn from_snapshot(coordinator: &Arc<SyncCoordinator>, snapshot: &Snapshot) -> Self {
        let lists = snapshot
            .lists
            .iter()
            .map(|list| ShoppingListEntity::new(Arc::clone(coordinator), &list.id, &list.name, list.shared))
            .collect();
        let budgets = snapshot
            .budgets
            .iter()
            .map(|budget| BudgetSensor::new(Arc::clone(coordinator), &budget.id, &budget.name))
            .collect();

        Self {
            lists,
            monthly_expenses: MonthlyExpensesSensor::new(Arc::clone(coordinator)),
            budgets,
        }
    }

    /// Number of entities, counting the monthly expense sensor.
    pub fn count(&self) -> usize {
        self.lists.len() + self.budgets.len() + 1
    }
}
