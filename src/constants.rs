//! Constants used throughout the integration
//!
//! This module centralizes the service origin, default timings, entity icons
//! and log strings so they stay consistent between modules.

// Remote service
/// Origin plus routing prefix of the SmartShopr Home Assistant API
pub const API_BASE_URL: &str = "https://bttooyefdbutcsxxzfcl.supabase.co/functions/v1/ha-api";
/// Environment variable read for the bearer token when none is configured
pub const DEFAULT_API_KEY_ENV: &str = "SMARTSHOPR_API_KEY";
/// Every request is bounded by this timeout
pub const REQUEST_TIMEOUT_SECS: u64 = 10;
/// Upper bound accepted for a configured request timeout
pub const REQUEST_TIMEOUT_MAX_SECS: u64 = 300;

// Refresh scheduling
/// Default polling interval
pub const SCAN_INTERVAL_SECS: u64 = 30;
/// Minimum polling interval accepted from configuration
pub const SCAN_INTERVAL_MIN_SECS: u64 = 5;
/// Maximum polling interval accepted from configuration (24 hours)
pub const SCAN_INTERVAL_MAX_SECS: u64 = 86_400;

// Entity identity
pub const MONTHLY_EXPENSES_UNIQUE_ID: &str = "smartshopr_monthly_expenses";
pub const MONTHLY_EXPENSES_NAME: &str = "SmartShopr Monthly Expenses";
/// Currency preferred by the monthly expense sensor
pub const PRIMARY_CURRENCY: &str = "EUR";

// Icons
pub const ICON_CART: &str = "mdi:cart";
pub const ICON_CART_SHARED: &str = "mdi:cart-heart";
pub const ICON_CASH_REGISTER: &str = "mdi:cash-register";
pub const ICON_PIGGY_BANK: &str = "mdi:piggy-bank";
pub const ICON_OVER_BUDGET: &str = "mdi:piggy-bank-outline";
pub const ICON_BUDGET_WARNING: &str = "mdi:alert-circle";

// Error Messages
pub const ERROR_INVALID_API_KEY: &str = "Invalid API key";
pub const ERROR_ACCESS_DENIED: &str = "Access denied";
pub const ERROR_UNKNOWN: &str = "Unknown error";
pub const ERROR_TIMEOUT: &str = "Request timeout";

// Log Messages
pub const LOG_REFRESH_STARTED: &str = "🔄 Starting refresh...";
pub const LOG_REFRESH_CANCELLED: &str = "⚠️ Refresh cancelled before completion";
pub const LOG_REFRESH_JOINED: &str = "🔁 Refresh request satisfied by a concurrent cycle";
pub const LOG_LOOP_STOPPED: &str = "⏹️  Periodic refresh stopped";

// UI Messages
pub const CONFIG_GENERATED: &str = "✅ Generated default configuration file";
pub const ERROR_NO_API_KEY: &str = "❌ Error: SmartShopr API key not found in environment";
