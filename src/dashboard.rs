use crate::errors::{DashboardError, DashboardResult};
use crate::messages::ImuMessage;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tracing::{debug, info};

/// Something the dashboard can poll for named values
pub trait Sendable: Send + Sync {
    /// Widget type shown on the dashboard (e.g. "Gyro")
    fn dashboard_type(&self) -> &'static str;
    /// Current property values
    fn properties(&self) -> Vec<(&'static str, f64)>;
}

/// A value published under a dashboard key
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum DashboardValue {
    Number(f64),
    Data {
        #[serde(rename = "type")]
        kind: String,
        properties: BTreeMap<String, f64>,
    },
}

/// Event sent to subscribers whenever a key is published
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DashboardUpdate {
    pub key: String,
    pub value: DashboardValue,
}

impl DashboardUpdate {
    pub fn to_json(&self) -> DashboardResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[derive(Default)]
struct Table {
    values: HashMap<String, DashboardValue>,
    sendables: HashMap<String, Arc<dyn Sendable>>,
}

/// Shared telemetry table with a broadcast feed of updates
#[derive(Clone)]
pub struct Dashboard {
    table: Arc<RwLock<Table>>,
    updates_tx: broadcast::Sender<DashboardUpdate>,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Dashboard {
    pub fn new() -> Self {
        // Room for a few seconds of 50 Hz IMU telemetry
        let (updates_tx, _) = broadcast::channel(1024);
        Self {
            table: Arc::new(RwLock::new(Table::default())),
            updates_tx,
        }
    }

    /// Register a sendable under `key` and publish its current values
    pub fn put_data(&self, key: &str, data: Arc<dyn Sendable>) {
        let value = snapshot(data.as_ref());
        {
            let mut table = self.table.write().unwrap_or_else(PoisonError::into_inner);
            table.sendables.insert(key.to_string(), data);
            table.values.insert(key.to_string(), value.clone());
        }
        info!("[dashboard] registered '{}'", key);
        self.broadcast(key, value);
    }

    pub fn put_number(&self, key: &str, number: f64) {
        let value = DashboardValue::Number(number);
        self.table
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .values
            .insert(key.to_string(), value.clone());
        self.broadcast(key, value);
    }

    pub fn get_number(&self, key: &str) -> Option<f64> {
        match self.get(key)? {
            DashboardValue::Number(n) => Some(n),
            DashboardValue::Data { .. } => None,
        }
    }

    /// Latest published properties of a registered sendable
    pub fn get_data(&self, key: &str) -> Option<BTreeMap<String, f64>> {
        match self.get(key)? {
            DashboardValue::Data { properties, .. } => Some(properties),
            DashboardValue::Number(_) => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<DashboardValue> {
        self.table
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values
            .get(key)
            .cloned()
    }

    pub fn keys(&self) -> Vec<String> {
        let table = self.table.read().unwrap_or_else(PoisonError::into_inner);
        let mut keys: Vec<String> = table.values.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Poll every registered sendable and publish its values
    pub fn update_values(&self) {
        // Sendables may read back from the dashboard, so poll them unlocked
        let sendables: Vec<(String, Arc<dyn Sendable>)> = self
            .table
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .sendables
            .iter()
            .map(|(key, data)| (key.clone(), data.clone()))
            .collect();

        let snapshots: Vec<(String, DashboardValue)> = sendables
            .iter()
            .map(|(key, data)| (key.clone(), snapshot(data.as_ref())))
            .collect();

        {
            let mut table = self.table.write().unwrap_or_else(PoisonError::into_inner);
            for (key, value) in &snapshots {
                table.values.insert(key.clone(), value.clone());
            }
        }

        for (key, value) in snapshots {
            self.broadcast(&key, value);
        }
    }

    pub fn subscribe(&self) -> BroadcastStream<DashboardUpdate> {
        BroadcastStream::new(self.updates_tx.subscribe())
    }

    fn broadcast(&self, key: &str, value: DashboardValue) {
        let update = DashboardUpdate {
            key: key.to_string(),
            value,
        };
        if self.updates_tx.send(update).is_err() {
            // No active subscribers - this is fine
            debug!("[dashboard] no subscribers for '{}'", key);
        }
    }
}

fn snapshot(data: &dyn Sendable) -> DashboardValue {
    DashboardValue::Data {
        kind: data.dashboard_type().to_string(),
        properties: data
            .properties()
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect(),
    }
}

/// Destination for periodic IMU telemetry
#[async_trait]
pub trait TelemetrySink: Send + Sync {
    async fn publish(&self, message: ImuMessage) -> DashboardResult<()>;
}

#[async_trait]
impl TelemetrySink for Dashboard {
    async fn publish(&self, message: ImuMessage) -> DashboardResult<()> {
        let values = [message.yaw, message.pitch, message.roll];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(DashboardError::PublishError {
                reason: format!("non-finite attitude from '{}'", message.h.sensor_id),
            });
        }

        let prefix = &message.h.sensor_id;
        self.put_number(&format!("{}/Yaw", prefix), message.yaw);
        self.put_number(&format!("{}/Pitch", prefix), message.pitch);
        self.put_number(&format!("{}/Roll", prefix), message.roll);

        if let Some([ax, ay, az]) = message.accel {
            self.put_number(&format!("{}/AccelX", prefix), ax);
            self.put_number(&format!("{}/AccelY", prefix), ay);
            self.put_number(&format!("{}/AccelZ", prefix), az);
        }

        self.update_values();
        Ok(())
    }
}
