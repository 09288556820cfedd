use chrono::NaiveDateTime;
use geo_types::Point;
use serde::{Deserialize, Serialize};

/// Timestamp format used by check-in logs, e.g. `05/31/2019 08:24:56`.
pub const TIMESTAMP_FORMAT: &str = "%m/%d/%Y %H:%M:%S";

const FIELD_DELIMITER: char = ',';

/// One timestamped position record from a check-in log.
/// The position follows the geo-types convention: x is longitude, y is latitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CheckIn {
    pub position: Point,
    pub timestamp: NaiveDateTime,
}

impl CheckIn {
    pub fn new(position: Point, timestamp: NaiveDateTime) -> Self {
        Self {
            position,
            timestamp,
        }
    }

    pub fn latitude(&self) -> f64 {
        self.position.y()
    }

    pub fn longitude(&self) -> f64 {
        self.position.x()
    }
}

impl TryFrom<&str> for CheckIn {
    type Error = String;

    /// Parses one log line. The first five comma-delimited fields are
    /// timestamp, tracker id, check-in type, latitude and longitude.
    /// Anything after the fifth field is ignored.
    fn try_from(line: &str) -> Result<Self, Self::Error> {
        let mut fields = line.split(FIELD_DELIMITER);

        let timestamp = fields
            .next()
            .ok_or_else(|| "Missing timestamp field".to_string())?;
        let timestamp = NaiveDateTime::parse_from_str(timestamp.trim(), TIMESTAMP_FORMAT)
            .map_err(|_| format!("Invalid timestamp: {:?}", timestamp.trim()))?;

        // Tracker id and check-in type are not used
        fields.next();
        fields.next();

        let latitude = parse_coordinate(fields.next(), "latitude")?;
        let longitude = parse_coordinate(fields.next(), "longitude")?;

        Ok(CheckIn::new(Point::new(longitude, latitude), timestamp))
    }
}

fn parse_coordinate(field: Option<&str>, name: &str) -> Result<f64, String> {
    let field = field.ok_or_else(|| format!("Missing {} field", name))?;
    field
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("Invalid {}: {:?}", name, field.trim()))
}
