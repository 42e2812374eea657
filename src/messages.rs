use serde::{Deserialize, Serialize};

/// Header metadata carried by every telemetry message
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Header {
    /// Robot identifier
    pub device_id: String,
    /// IMU identifier from the configuration (e.g., "gyro")
    pub sensor_id: String,
    /// Sequence number for message ordering
    pub seq: u64,
    /// UTC timestamp in nanoseconds
    pub t_utc_ns: u64,
    /// Message schema version for evolution
    pub schema_v: u16,
}

impl Header {
    pub fn new(device_id: String, sensor_id: String, seq: u64) -> Self {
        use std::time::{SystemTime, UNIX_EPOCH};

        let t_utc_ns = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos() as u64;

        Self {
            device_id,
            sensor_id,
            seq,
            t_utc_ns,
            schema_v: 1,
        }
    }
}

/// One IMU sample as seen by the drive stack
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ImuMessage {
    pub h: Header,
    /// Yaw relative to the captured offset (degrees)
    pub yaw: f64,
    /// Pitch (degrees)
    pub pitch: f64,
    /// Roll (degrees)
    pub roll: f64,
    /// Acceleration (m/s²), absent when the device has no accelerometer
    pub accel: Option<[f64; 3]>,
}

impl ImuMessage {
    /// Serialize to JSON for debugging
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_creation() {
        let header = Header::new("robot".to_string(), "gyro".to_string(), 42);

        assert_eq!(header.device_id, "robot");
        assert_eq!(header.sensor_id, "gyro");
        assert_eq!(header.seq, 42);
        assert_eq!(header.schema_v, 1);
        assert!(header.t_utc_ns > 0);
    }

    #[test]
    fn test_imu_message_json() {
        let msg = ImuMessage {
            h: Header::new("robot".to_string(), "gyro".to_string(), 1),
            yaw: 45.5,
            pitch: 0.0,
            roll: 0.0,
            accel: None,
        };

        let json = msg.to_json().unwrap();
        assert!(json.contains("gyro"));
        assert!(json.contains("45.5"));

        let decoded: ImuMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.yaw, 45.5);
        assert!(decoded.accel.is_none());
    }
}
