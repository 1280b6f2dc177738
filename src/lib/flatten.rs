use tracing::{instrument, Level};

use super::error::FlattenError;
use super::keys::extract_keys;
use super::models::{Location, Locations, Row};

impl Location {
    /// Replaces the nested street, coordinates and timezone groups with flat
    /// columns. Every other field is carried over.
    pub fn flatten(&self) -> Row {
        Row {
            city: self.city.clone(),
            state: self.state.clone(),
            country: self.country.clone(),
            postcode: self.postcode.clone(),
            extra: self.extra.clone(),
            street_number: self.street.number.clone(),
            street_name: self.street.name.clone(),
            latitude: self.coordinates.latitude.clone(),
            longitude: self.coordinates.longitude.clone(),
            offset: self.timezone.offset.clone(),
            description: self.timezone.description.clone(),
        }
    }
}

/// Flattens a batch, keeping input order. Headers come from the first row.
#[instrument(skip(locations), fields(count = locations.len()))]
pub fn flatten_locations(locations: &[Location]) -> Result<Locations, FlattenError> {
    let data: Vec<Row> = locations.iter().map(Location::flatten).collect();
    let first = data.first().ok_or(FlattenError::EmptyBatch)?;
    let headers = extract_keys(&serde_json::to_value(first)?);

    tracing::event!(Level::DEBUG, "flattened {} rows with headers {:?}", data.len(), headers);

    Ok(Locations { headers, data })
}
