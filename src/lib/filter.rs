use super::models::Row;

/// Rows whose serialized text contains `query`. The query is expected to be
/// lowercase already; only the row text is lowercased here.
pub fn filter_rows<'a>(rows: &'a [Row], query: &str) -> Vec<&'a Row> {
    rows.iter()
        .filter(|row| {
            serde_json::to_string(row)
                .map(|text| text.to_lowercase().contains(query))
                .unwrap_or(false)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::Map;

    use super::*;
    use crate::lib::models::Cell;

    fn row(city: &str, description: &str) -> Row {
        Row {
            city: Cell::Text(city.to_string()),
            state: Cell::Null,
            country: Cell::Null,
            postcode: Cell::Number(74820.into()),
            extra: Map::new(),
            street_number: Cell::Null,
            street_name: Cell::Null,
            latitude: Cell::Null,
            longitude: Cell::Null,
            offset: Cell::Null,
            description: Cell::Text(description.to_string()),
        }
    }

    #[test]
    fn test_empty_query_keeps_everything() {
        let rows = vec![row("Bath", ""), row("Ada", "")];
        let filtered = filter_rows(&rows, "");
        assert_eq!(filtered, vec![&rows[0], &rows[1]]);
    }

    #[test]
    fn test_case_insensitive_match() {
        let rows = vec![row("Bath", ""), row("Ada", "")];
        assert_eq!(filter_rows(&rows, "ada"), vec![&rows[1]]);
    }

    #[test]
    fn test_matches_synthetic_and_numeric_fields() {
        let rows = vec![row("Bath", "Western Europe"), row("Ada", "Central Time")];
        assert_eq!(filter_rows(&rows, "europe"), vec![&rows[0]]);
        assert_eq!(filter_rows(&rows, "7482").len(), 2);
    }

    #[test]
    fn test_uppercase_query_is_not_folded() {
        let rows = vec![row("Ada", "")];
        assert!(filter_rows(&rows, "ADA").is_empty());
    }
}
