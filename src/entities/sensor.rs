//! Monetary sensors: the month's expenses and one sensor per budget.

use std::collections::BTreeMap;
use std::sync::Arc;

use rust_decimal::Decimal;

use crate::constants::{
    ICON_BUDGET_WARNING, ICON_CASH_REGISTER, ICON_OVER_BUDGET, ICON_PIGGY_BANK, MONTHLY_EXPENSES_NAME,
    MONTHLY_EXPENSES_UNIQUE_ID, PRIMARY_CURRENCY,
};
use crate::coordinator::SyncCoordinator;
use crate::models::Budget;

#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseAttributes {
    pub month: Option<String>,
    pub expense_count: u32,
    pub totals_by_currency: BTreeMap<String, Decimal>,
}

pub struct MonthlyExpensesSensor {
    coordinator: Arc<SyncCoordinator>,
}

impl MonthlyExpensesSensor {
    pub fn new(coordinator: Arc<SyncCoordinator>) -> Self {
        Self { coordinator }
    }

    pub fn unique_id(&self) -> &'static str {
        MONTHLY_EXPENSES_UNIQUE_ID
    }

    pub fn name(&self) -> &'static str {
        MONTHLY_EXPENSES_NAME
    }

    pub fn icon(&self) -> &'static str {
        ICON_CASH_REGISTER
    }

    pub fn available(&self) -> bool {
        self.coordinator.last_update_success()
    }

    /// The EUR total, or the sum over all currencies when there is none. A sum
    /// beyond the decimal range saturates.
    pub fn native_value(&self) -> Decimal {
        let Some(snapshot) = self.coordinator.snapshot() else {
            return Decimal::ZERO;
        };
        let totals = &snapshot.expenses.totals;
        let total = match totals.get(PRIMARY_CURRENCY) {
            Some(eur) => *eur,
            None => totals
                .values()
                .try_fold(Decimal::ZERO, |acc, value| acc.checked_add(*value))
                .unwrap_or(Decimal::MAX),
        };
        total.round_dp(2)
    }

    pub fn attributes(&self) -> ExpenseAttributes {
        let expenses = self
            .coordinator
            .snapshot()
            .map(|snapshot| snapshot.expenses.clone())
            .unwrap_or_default();
        ExpenseAttributes {
            month: expenses.month,
            expense_count: expenses.expense_count,
            totals_by_currency: expenses.totals,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BudgetAttributes {
    pub budget_name: String,
    pub target_amount: Decimal,
    pub spent: Decimal,
    pub expense_count: u32,
    pub shared: bool,
    /// Only present when the target is positive.
    pub percentage_used: Option<Decimal>,
}

pub struct BudgetSensor {
    coordinator: Arc<SyncCoordinator>,
    budget_id: String,
    budget_name: String,
}

impl BudgetSensor {
    pub fn new(coordinator: Arc<SyncCoordinator>, budget_id: &str, budget_name: &str) -> Self {
        Self {
            coordinator,
            budget_id: budget_id.to_string(),
            budget_name: budget_name.to_string(),
        }
    }

    pub fn unique_id(&self) -> String {
        format!("smartshopr_budget_{}", self.budget_id)
    }

    pub fn name(&self) -> String {
        format!("Budget: {}", self.budget_name)
    }

    pub fn available(&self) -> bool {
        self.coordinator.last_update_success()
    }

    fn budget(&self) -> Option<Budget> {
        self.coordinator.snapshot()?.budget(&self.budget_id).cloned()
    }

    /// Remaining amount exactly as the service reported it.
    pub fn native_value(&self) -> Option<Decimal> {
        self.budget()?.remaining
    }

    pub fn attributes(&self) -> Option<BudgetAttributes> {
        let budget = self.budget()?;
        Some(BudgetAttributes {
            percentage_used: percentage_used(&budget).map(|pct| pct.round_dp(1)),
            budget_name: budget.name,
            target_amount: budget.target_amount,
            spent: budget.spent,
            expense_count: budget.expense_count,
            shared: budget.shared,
        })
    }

    pub fn icon(&self) -> &'static str {
        let percentage = self.budget().as_ref().and_then(percentage_used);
        match percentage {
            Some(pct) if pct >= Decimal::ONE_HUNDRED => ICON_OVER_BUDGET,
            Some(pct) if pct >= Decimal::from(80) => ICON_BUDGET_WARNING,
            _ => ICON_PIGGY_BANK,
        }
    }
}

/// None for a non-positive target, or when the ratio leaves the decimal range.
fn percentage_used(budget: &Budget) -> Option<Decimal> {
    if budget.target_amount <= Decimal::ZERO {
        return None;
    }
    budget
        .spent
        .checked_div(budget.target_amount)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
}
