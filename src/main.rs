use swerve_imu::{init_tracing, run_imu_telemetry};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=debug for per-sample output
    init_tracing();

    let config_path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config".to_string());
    tracing::info!("[main] Configuration path: {}", config_path);

    run_imu_telemetry(&config_path).await
}
