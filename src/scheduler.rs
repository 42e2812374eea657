use crate::config::SwerveImuConfig;
use crate::dashboard::TelemetrySink;
use crate::imu::SwerveImu;
use crate::messages::{Header, ImuMessage};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, info, warn};

pub type SharedImu = Arc<Mutex<Box<dyn SwerveImu>>>;

/// Periodically sample the IMU and publish each sample to `sink`
pub fn spawn_imu_task<S>(imu: SharedImu, sink: Arc<S>, config: &SwerveImuConfig) -> JoinHandle<()>
where
    S: TelemetrySink + 'static,
{
    let sensor_id = config.imu.id.clone();
    let device_id = config.telemetry.device_id.clone();
    // Guards configs built without parse_config, which rejects zero
    let frequency = config.telemetry.frequency.max(1);
    let period = Duration::from_secs_f64(1.0 / frequency as f64);

    tokio::spawn(async move {
        info!("[{}] Starting IMU telemetry at {}Hz", sensor_id, frequency);

        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut sequence_counter = 0u64;

        loop {
            ticker.tick().await;

            let (ypr, accel) = {
                let imu = imu.lock().await;
                (imu.yaw_pitch_roll(), imu.accel())
            };

            sequence_counter += 1;
            let message = ImuMessage {
                h: Header::new(device_id.clone(), sensor_id.clone(), sequence_counter),
                yaw: ypr[0],
                pitch: ypr[1],
                roll: ypr[2],
                accel: accel.map(|a| a.to_array()),
            };
            debug!(
                "[{}] seq={} yaw={:.2} pitch={:.2} roll={:.2}",
                sensor_id, sequence_counter, message.yaw, message.pitch, message.roll
            );

            if let Err(e) = sink.publish(message).await {
                warn!("[{}] Failed to publish: {}", sensor_id, e);
            }
        }
    })
}

#[cfg(all(test, feature = "adis16470"))]
mod tests {
    use super::*;
    use crate::config::parse_config;
    use crate::dashboard::Dashboard;
    use crate::driver::SimAdis16470;
    use crate::errors::{DashboardError, DashboardResult};
    use crate::imu::Adis16470Swerve;
    use async_trait::async_trait;
    use tokio::sync::mpsc;

    struct ChannelSink(mpsc::UnboundedSender<ImuMessage>);

    #[async_trait]
    impl TelemetrySink for ChannelSink {
        async fn publish(&self, message: ImuMessage) -> DashboardResult<()> {
            self.0.send(message).map_err(|e| DashboardError::PublishError {
                reason: e.to_string(),
            })
        }
    }

    fn config() -> SwerveImuConfig {
        parse_config(
            r#"
            [imu]
            id = "gyro"
            driver = "adis16470_sim"

            [telemetry]
            device_id = "bot"
            frequency = 200
            "#,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_task_publishes_sequenced_samples() {
        let device = Arc::new(SimAdis16470::new());
        device.set_angle(30.0);
        let dashboard = Dashboard::new();
        let swerve = Adis16470Swerve::new(device.clone(), &dashboard);
        device.set_angle(75.0);
        device.set_accel(0.0, 0.0, 9.81);

        let boxed: Box<dyn SwerveImu> = Box::new(swerve);
        let imu: SharedImu = Arc::new(Mutex::new(boxed));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = spawn_imu_task(imu, Arc::new(ChannelSink(tx)), &config());

        let first = rx.recv().await.unwrap();
        let second = rx.recv().await.unwrap();
        handle.abort();

        assert_eq!(first.h.sensor_id, "gyro");
        assert_eq!(first.h.device_id, "bot");
        assert_eq!(first.h.seq, 1);
        assert_eq!(second.h.seq, 2);
        assert_eq!(first.yaw, 45.0);
        assert_eq!(first.accel, Some([0.0, 0.0, 9.81]));
    }

    #[tokio::test]
    async fn test_zero_frequency_falls_back_to_one_hz() {
        let mut config = config();
        config.telemetry.frequency = 0;

        let device = Arc::new(SimAdis16470::new());
        let swerve = Adis16470Swerve::new(device, &Dashboard::new());
        let boxed: Box<dyn SwerveImu> = Box::new(swerve);
        let imu: SharedImu = Arc::new(Mutex::new(boxed));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = spawn_imu_task(imu, Arc::new(ChannelSink(tx)), &config);

        // The first tick fires immediately
        let first = rx.recv().await.unwrap();
        handle.abort();
        assert_eq!(first.h.seq, 1);
    }

    #[tokio::test]
    async fn test_task_feeds_dashboard() {
        let device = Arc::new(SimAdis16470::new());
        let dashboard = Dashboard::new();
        let mut swerve = Adis16470Swerve::new(device.clone(), &dashboard);
        swerve.set_yaw(90.0);

        let boxed: Box<dyn SwerveImu> = Box::new(swerve);
        let imu: SharedImu = Arc::new(Mutex::new(boxed));
        let sink = Arc::new(dashboard.clone());
        let handle = spawn_imu_task(imu, sink, &config());

        let mut yaw = None;
        for _ in 0..100 {
            yaw = dashboard.get_number("gyro/Yaw");
            if yaw.is_some() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        handle.abort();

        assert_eq!(yaw, Some(90.0));
    }
}
