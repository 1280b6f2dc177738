//! The table's view model.
//!
//! A [`ViewModel`] is never edited in place: every interaction is a
//! [`ViewEvent`] and [`ViewModel::apply`] returns the model that follows it.

use std::collections::HashMap;

use tracing::{instrument, Level};

use super::error::FetchError;
use super::filter::filter_rows;
use super::flatten::flatten_locations;
use super::models::{Locations, Person, Row};
use super::sort::{sort_rows, SortDirection, ToggleMode};

#[derive(Debug)]
pub enum ViewEvent {
    FetchCompleted(Result<Vec<Person>, FetchError>),
    ColumnClicked(String),
    QueryChanged(String),
}

impl ViewEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ViewEvent::FetchCompleted(_) => "fetch_completed",
            ViewEvent::ColumnClicked(_) => "column_clicked",
            ViewEvent::QueryChanged(_) => "query_changed",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Loading,
    Failed(String),
    Ready(Table),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub people: Vec<Person>,
    pub locations: Locations,
    pub directions: HashMap<String, SortDirection>,
}

impl Table {
    pub fn direction(&self, header: &str) -> SortDirection {
        self.directions.get(header).copied().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    toggle: ToggleMode,
    query: String,
    state: ViewState,
}

impl ViewModel {
    pub fn new(toggle: ToggleMode) -> Self {
        ViewModel {
            toggle,
            query: String::new(),
            state: ViewState::Loading,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn table(&self) -> Option<&Table> {
        match &self.state {
            ViewState::Ready(table) => Some(table),
            _ => None,
        }
    }

    /// Rows matching the current query, in table order.
    pub fn visible_rows(&self) -> Vec<&Row> {
        match &self.state {
            ViewState::Ready(table) => filter_rows(&table.locations.data, &self.query.to_lowercase()),
            _ => Vec::new(),
        }
    }

    #[instrument(skip(self, event), fields(event = event.name(), toggle = ?self.toggle))]
    pub fn apply(self, event: ViewEvent) -> ViewModel {
        match event {
            ViewEvent::FetchCompleted(result) => self.fetch_completed(result),
            ViewEvent::ColumnClicked(header) => self.column_clicked(&header),
            ViewEvent::QueryChanged(query) => ViewModel { query, ..self },
        }
    }

    fn fetch_completed(self, result: Result<Vec<Person>, FetchError>) -> ViewModel {
        let state = match result {
            Err(error) => ViewState::Failed(error.to_string()),
            Ok(people) => {
                let locations: Vec<_> = people.iter().map(|p| p.location.clone()).collect();
                match flatten_locations(&locations) {
                    Err(error) => {
                        tracing::warn!(%error, "no table to show");
                        ViewState::Failed(error.to_string())
                    }
                    Ok(locations) => {
                        let directions = locations
                            .headers
                            .iter()
                            .map(|h| (h.clone(), SortDirection::Unsorted))
                            .collect();
                        ViewState::Ready(Table {
                            people,
                            locations,
                            directions,
                        })
                    }
                }
            }
        };
        ViewModel { state, ..self }
    }

    fn column_clicked(self, header: &str) -> ViewModel {
        let ViewState::Ready(table) = &self.state else {
            tracing::event!(Level::DEBUG, "ignoring click on {} before data is ready", header);
            return self;
        };
        if !table.locations.headers.iter().any(|h| h == header) {
            tracing::warn!(header, "click on unknown column");
            return self;
        }

        let (applied, recorded) = self.toggle.click(table.direction(header));

        let mut data = table.locations.data.clone();
        sort_rows(&mut data, header, applied);

        let mut directions = table.directions.clone();
        directions.insert(header.to_string(), recorded);

        tracing::event!(Level::DEBUG, "sorted {} {:?}, next state {:?}", header, applied, recorded);

        let table = Table {
            people: table.people.clone(),
            locations: Locations {
                headers: table.locations.headers.clone(),
                data,
            },
            directions,
        };
        ViewModel {
            state: ViewState::Ready(table),
            ..self
        }
    }
}
