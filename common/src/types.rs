use serde::{Deserialize, Deserializer, Serialize};

/// Body returned by `devInfoListAll`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceListResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<DeviceRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceRecord {
    #[serde(rename = "deviceInfo", default, deserialize_with = "null_as_default")]
    pub device_info: DeviceInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceInfo {
    #[serde(rename = "temperatureF", default)]
    pub temperature_f: i64,
    #[serde(default)]
    pub humidity: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ports: Vec<Port>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sensors: Vec<Sensor>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Port {
    #[serde(rename = "portName", default)]
    pub port_name: String,
    /// Power level, 0 through 10.
    #[serde(default)]
    pub speak: i64,
    pub port: i64,
    #[serde(rename = "curMode", default)]
    pub cur_mode: i64,
    #[serde(default)]
    pub online: i64,
}

impl Port {
    pub fn is_online(&self) -> bool {
        self.online == 1
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sensor {
    #[serde(rename = "sensorType")]
    pub sensor_type: i64,
    #[serde(rename = "accessPort", default)]
    pub access_port: i64,
    /// Reading scaled by 100.
    #[serde(rename = "sensorData")]
    pub sensor_data: i64,
}

/// The API sends `null` where it has nothing to report.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn decodes_device_list() {
        let body = r#"{
            "code": 200,
            "msg": "success",
            "data": [{
                "devId": "1424979258063355749",
                "deviceInfo": {
                    "temperatureF": 7421,
                    "humidity": 5512,
                    "ports": [
                        {"portName": "Exhaust", "speak": 7, "port": 1, "curMode": 2, "online": 1},
                        {"portName": "Light", "speak": 0, "port": 2, "curMode": 1, "online": 0}
                    ],
                    "sensors": [
                        {"sensorType": 0, "accessPort": 1, "sensorData": 2350},
                        {"sensorType": 3, "accessPort": 1, "sensorData": 118}
                    ]
                }
            }]
        }"#;

        let response: DeviceListResponse = serde_json::from_str(body).unwrap();

        assert_eq!(response.data.len(), 1);
        let info = &response.data[0].device_info;
        assert_eq!(info.temperature_f, 7421);
        assert_eq!(info.humidity, 5512);
        assert_eq!(
            info.ports[0],
            Port {
                port_name: "Exhaust".to_string(),
                speak: 7,
                port: 1,
                cur_mode: 2,
                online: 1,
            }
        );
        assert!(!info.ports[1].is_online());
        assert_eq!(
            info.sensors[1],
            Sensor {
                sensor_type: 3,
                access_port: 1,
                sensor_data: 118,
            }
        );
    }

    #[test]
    fn missing_collections_decode_empty() {
        let response: DeviceListResponse =
            serde_json::from_str(r#"{"data": [{"deviceInfo": {}}]}"#).unwrap();

        assert!(response.data[0].device_info.ports.is_empty());
        assert!(response.data[0].device_info.sensors.is_empty());

        let empty: DeviceListResponse = serde_json::from_str(r#"{"code": 100001}"#).unwrap();
        assert!(empty.data.is_empty());
    }

    #[test]
    fn null_collections_decode_empty() {
        let response: DeviceListResponse = serde_json::from_str(
            r#"{"data": [{"deviceInfo": {"ports": null, "sensors": [{"sensorType": 0, "sensorData": 2350}]}}]}"#,
        )
        .unwrap();

        let info = &response.data[0].device_info;
        assert!(info.ports.is_empty());
        assert_eq!(info.sensors[0].sensor_data, 2350);

        let sensors_null: DeviceListResponse =
            serde_json::from_str(r#"{"data": [{"deviceInfo": {"sensors": null}}]}"#).unwrap();
        assert!(sensors_null.data[0].device_info.sensors.is_empty());

        let no_info: DeviceListResponse =
            serde_json::from_str(r#"{"data": [{"deviceInfo": null}]}"#).unwrap();
        assert_eq!(no_info.data[0].device_info, DeviceInfo::default());

        let data_null: DeviceListResponse =
            serde_json::from_str(r#"{"code": 100001, "data": null}"#).unwrap();
        assert!(data_null.data.is_empty());
    }
}
