pub mod config;
pub mod days;
pub mod metrics;
pub mod outputs;
pub mod types;

pub use config::{Config, ConfigError};
pub use days::{day_label, day_number, elapsed_days};
pub use metrics::{render_days, render_devices, render_port, render_sensor, MetricFile};
pub use outputs::*;
pub use types::{DeviceInfo, DeviceListResponse, DeviceRecord, Port, Sensor};
