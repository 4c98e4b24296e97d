#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use smartshopr::transport::{Method, Transport};
use smartshopr::{ApiError, SmartShoprApi, SyncCoordinator};

/// A request seen by [`ScriptedTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: Method,
    pub endpoint: String,
    pub body: Option<Value>,
}

/// In-memory transport answering from a table keyed by `"METHOD endpoint"`.
#[derive(Default)]
pub struct ScriptedTransport {
    routes: Mutex<HashMap<String, Result<Value, ApiError>>>,
    delays: Mutex<HashMap<String, Duration>>,
    calls: Mutex<Vec<Call>>,
}

fn key(method: &Method, endpoint: &str) -> String {
    format!("{method} {endpoint}")
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, method: Method, endpoint: &str, response: Value) {
        self.routes.lock().unwrap().insert(key(&method, endpoint), Ok(response));
    }

    pub fn fail(&self, method: Method, endpoint: &str, error: ApiError) {
        self.routes.lock().unwrap().insert(key(&method, endpoint), Err(error));
    }

    pub fn delay(&self, method: Method, endpoint: &str, delay: Duration) {
        self.delays.lock().unwrap().insert(key(&method, endpoint), delay);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, method: Method, endpoint: &str) -> usize {
        self.calls()
            .iter()
            .filter(|call| call.method == method && call.endpoint == endpoint)
            .count()
    }

    pub fn last_body(&self, method: Method, endpoint: &str) -> Option<Value> {
        self.calls()
            .into_iter()
            .rev()
            .find(|call| call.method == method && call.endpoint == endpoint)
            .and_then(|call| call.body)
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn request(&self, method: Method, endpoint: &str, body: Option<Value>) -> Result<Value, ApiError> {
        let key = key(&method, endpoint);
        self.calls.lock().unwrap().push(Call {
            method,
            endpoint: endpoint.to_string(),
            body,
        });

        let delay = self.delays.lock().unwrap().get(&key).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let response = self.routes.lock().unwrap().get(&key).cloned();
        response.unwrap_or_else(|| Err(ApiError::api(format!("no route for {key}"))))
    }
}

/// Three lists, two budgets and an expense summary.
pub fn seed_account(transport: &ScriptedTransport) {
    transport.respond(
        Method::GET,
        "lists",
        json!({"lists": [
            {"id": "l1", "name": "Groceries", "shared": false},
            {"id": "l2", "name": "Pharmacy", "shared": true},
            {"id": "l3", "name": "Hardware"}
        ]}),
    );
    transport.respond(
        Method::GET,
        "lists/l1/items",
        json!({"items": [
            {"id": "i1", "name": "Milk", "quantity_value": 2, "quantity_unit": "L", "is_completed": false},
            {"id": "i2", "name": "Eggs", "quantity_value": 6, "is_completed": true}
        ]}),
    );
    transport.respond(
        Method::GET,
        "lists/l2/items",
        json!({"items": [{"id": "i3", "name": "Plasters"}]}),
    );
    transport.respond(Method::GET, "lists/l3/items", json!({}));
    transport.respond(
        Method::GET,
        "budgets",
        json!({"budgets": [
            {"id": "b1", "name": "Food", "target_amount": 400, "spent": 330, "expense_count": 12, "remaining": 70},
            {"id": "b2", "name": "Fun", "target_amount": 50, "spent": 80, "remaining": 5, "shared": true}
        ]}),
    );
    transport.respond(
        Method::GET,
        "expenses/month",
        json!({"month": "2026-10", "expense_count": 14, "totals": {"EUR": 410.456, "USD": 12}}),
    );
}

pub fn coordinator(transport: Arc<ScriptedTransport>) -> Arc<SyncCoordinator> {
    Arc::new(SyncCoordinator::new(SmartShoprApi::new(transport), Duration::from_secs(30)))
}
