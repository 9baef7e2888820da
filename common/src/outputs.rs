pub const FILE_DAYS: &str = "days.txt";

pub const FILE_INSIDE_TEMP: &str = "inside_temp.txt";
pub const FILE_INSIDE_HUMIDITY: &str = "inside_humidity.txt";
pub const FILE_VPD: &str = "vpd.txt";
pub const FILE_OUTSIDE_TEMP: &str = "outside_temp.txt";
pub const FILE_OUTSIDE_HUMIDITY: &str = "outside_humidity.txt";

pub fn port_file(port: i64) -> String {
    format!("port_{port}.txt")
}
