use tracing::debug;

use crate::{
    days::day_label,
    outputs::{
        port_file, FILE_DAYS, FILE_INSIDE_HUMIDITY, FILE_INSIDE_TEMP, FILE_OUTSIDE_HUMIDITY,
        FILE_OUTSIDE_TEMP, FILE_VPD,
    },
    types::{DeviceListResponse, Port, Sensor},
};

pub const PORT_OFFLINE: &str = "Offline";

/// Sensor readings arrive as fixed-point integers with two decimals.
const SENSOR_SCALE: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Degrees,
    Percent,
    Plain,
}

impl Unit {
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Degrees => "°",
            Self::Percent => "%",
            Self::Plain => "",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorOutput {
    pub sensor_type: i64,
    pub file: &'static str,
    pub label: &'static str,
    pub unit: Unit,
}

pub const SENSOR_OUTPUTS: &[SensorOutput] = &[
    SensorOutput {
        sensor_type: 0,
        file: FILE_INSIDE_TEMP,
        label: "Temp",
        unit: Unit::Degrees,
    },
    SensorOutput {
        sensor_type: 2,
        file: FILE_INSIDE_HUMIDITY,
        label: "Humidity",
        unit: Unit::Percent,
    },
    SensorOutput {
        sensor_type: 3,
        file: FILE_VPD,
        label: "VPD",
        unit: Unit::Plain,
    },
    SensorOutput {
        sensor_type: 4,
        file: FILE_OUTSIDE_TEMP,
        label: "Temp",
        unit: Unit::Degrees,
    },
    SensorOutput {
        sensor_type: 6,
        file: FILE_OUTSIDE_HUMIDITY,
        label: "Humidity",
        unit: Unit::Percent,
    },
];

impl SensorOutput {
    pub fn lookup(sensor_type: i64) -> Option<&'static SensorOutput> {
        SENSOR_OUTPUTS
            .iter()
            .find(|output| output.sensor_type == sensor_type)
    }

    pub fn format(&self, raw: i64) -> String {
        let value = raw as f64 / SENSOR_SCALE;
        format!("{}: {value:.1}{}", self.label, self.unit.suffix())
    }
}

/// One output file and the full text it should hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricFile {
    pub name: String,
    pub contents: String,
}

impl MetricFile {
    pub fn new(name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
        }
    }
}

pub fn render_days(day: i64) -> MetricFile {
    MetricFile::new(FILE_DAYS, day_label(day))
}

pub fn render_sensor(sensor: &Sensor) -> Option<MetricFile> {
    let Some(output) = SensorOutput::lookup(sensor.sensor_type) else {
        debug!(
            "skipping sensor type {} on port {}",
            sensor.sensor_type, sensor.access_port
        );
        return None;
    };

    Some(MetricFile::new(output.file, output.format(sensor.sensor_data)))
}

pub fn render_port(port: &Port) -> MetricFile {
    let contents = if port.is_online() {
        format!("{}: {}%", port.port_name, port.speak.saturating_mul(10))
    } else {
        PORT_OFFLINE.to_string()
    };

    MetricFile::new(port_file(port.port), contents)
}

/// Flattens every device into files, sensors first then ports. Devices that
/// share a file name produce several entries; the last one written wins.
pub fn render_devices(response: &DeviceListResponse) -> Vec<MetricFile> {
    response
        .data
        .iter()
        .flat_map(|record| {
            let info = &record.device_info;
            info.sensors
                .iter()
                .filter_map(render_sensor)
                .chain(info.ports.iter().map(render_port))
        })
        .collect()
}
