use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// A scalar JSON leaf as it arrives from the API.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(untagged)]
pub enum Cell {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    Text(String),
}

impl Cell {
    /// Scalar view of a JSON value; objects and arrays have none.
    pub fn from_value(value: &Value) -> Option<Cell> {
        match value {
            Value::Null => Some(Cell::Null),
            Value::Bool(b) => Some(Cell::Bool(*b)),
            Value::Number(n) => Some(Cell::Number(n.clone())),
            Value::String(s) => Some(Cell::Text(s.clone())),
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    fn to_number(&self) -> f64 {
        match self {
            Cell::Null => 0.0,
            Cell::Bool(b) => f64::from(u8::from(*b)),
            Cell::Number(n) => n.as_f64().unwrap_or(f64::NAN),
            Cell::Text(s) if s.trim().is_empty() => 0.0,
            Cell::Text(s) => s.trim().parse().unwrap_or(f64::NAN),
        }
    }

    /// Relational ordering: text against text is lexicographic by UTF-16 code
    /// unit, anything else is compared numerically. Values without a numeric
    /// reading compare equal, so this is not a total order.
    pub fn compare(&self, other: &Cell) -> Ordering {
        match (self, other) {
            (Cell::Text(a), Cell::Text(b)) => a.encode_utf16().cmp(b.encode_utf16()),
            _ => self
                .to_number()
                .partial_cmp(&other.to_number())
                .unwrap_or(Ordering::Equal),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Null => Ok(()),
            Cell::Bool(b) => write!(f, "{}", b),
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub results: Vec<Person>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Person {
    pub location: Location,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Location {
    pub street: Street,
    #[serde(default)]
    pub city: Cell,
    #[serde(default)]
    pub state: Cell,
    #[serde(default)]
    pub country: Cell,
    #[serde(default)]
    pub postcode: Cell,
    pub coordinates: Coordinates,
    pub timezone: Timezone,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Street {
    #[serde(default)]
    pub number: Cell,
    #[serde(default)]
    pub name: Cell,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Coordinates {
    #[serde(default)]
    pub latitude: Cell,
    #[serde(default)]
    pub longitude: Cell,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Timezone {
    #[serde(default)]
    pub offset: Cell,
    #[serde(default)]
    pub description: Cell,
}

/// One flattened location. Serializes flat fields first, then the extra wire
/// fields, then the synthetic columns.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Row {
    pub city: Cell,
    pub state: Cell,
    pub country: Cell,
    pub postcode: Cell,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    #[serde(rename = "StreetNumber")]
    pub street_number: Cell,
    #[serde(rename = "StreetName")]
    pub street_name: Cell,
    #[serde(rename = "Latitude")]
    pub latitude: Cell,
    #[serde(rename = "Longitude")]
    pub longitude: Cell,
    #[serde(rename = "Offset")]
    pub offset: Cell,
    #[serde(rename = "Des")]
    pub description: Cell,
}

impl Row {
    /// Looks a column up by its header name.
    pub fn get(&self, key: &str) -> Option<Cow<'_, Cell>> {
        let cell = match key {
            "city" => &self.city,
            "state" => &self.state,
            "country" => &self.country,
            "postcode" => &self.postcode,
            "StreetNumber" => &self.street_number,
            "StreetName" => &self.street_name,
            "Latitude" => &self.latitude,
            "Longitude" => &self.longitude,
            "Offset" => &self.offset,
            "Des" => &self.description,
            _ => return self.extra.get(key).and_then(Cell::from_value).map(Cow::Owned),
        };
        Some(Cow::Borrowed(cell))
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Default)]
pub struct Locations {
    pub headers: Vec<String>,
    pub data: Vec<Row>,
}
