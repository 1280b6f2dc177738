use std::collections::HashMap;

use tiny_http::{Header, Method, Response, Server};
use tracing::{instrument, Level};
use url::form_urlencoded;

use super::view::{ViewEvent, ViewModel};
use super::render::render_page;

#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Html(String),
    Json(String),
    Redirect(String),
    NotFound,
    MethodNotAllowed,
}

fn split_url(url: &str) -> (&str, HashMap<String, String>) {
    let (path, query) = url.split_once('?').unwrap_or((url, ""));
    let params = form_urlencoded::parse(query.as_bytes()).into_owned().collect();
    (path, params)
}

/// Maps one request onto a view transition and the reply to send back.
#[instrument(skip(model))]
pub fn route(model: ViewModel, method: &Method, url: &str) -> (ViewModel, Reply) {
    if *method != Method::Get {
        return (model, Reply::MethodNotAllowed);
    }

    let (path, mut params) = split_url(url);
    match path {
        "/" => {
            let model = match params.remove("q") {
                Some(q) => model.apply(ViewEvent::QueryChanged(q)),
                None => model,
            };
            let page = render_page(&model);
            (model, Reply::Html(page))
        }
        "/search" => {
            let q = params.remove("q").unwrap_or_default();
            (model.apply(ViewEvent::QueryChanged(q)), Reply::Redirect("/".to_string()))
        }
        "/sort" => match params.remove("column") {
            Some(column) => (model.apply(ViewEvent::ColumnClicked(column)), Reply::Redirect("/".to_string())),
            None => (model, Reply::Redirect("/".to_string())),
        },
        "/rows.json" => {
            let body = serde_json::to_string(&model.visible_rows()).unwrap_or_else(|_| "[]".to_string());
            (model, Reply::Json(body))
        }
        _ => (model, Reply::NotFound),
    }
}

fn header(name: &str, value: &str) -> Option<Header> {
    Header::from_bytes(name.as_bytes(), value.as_bytes()).ok()
}

fn respond(request: tiny_http::Request, reply: Reply) -> std::io::Result<()> {
    let (status, body, headers) = match reply {
        Reply::Html(body) => (200, body, header("Content-Type", "text/html; charset=utf-8")),
        Reply::Json(body) => (200, body, header("Content-Type", "application/json")),
        Reply::Redirect(location) => (303, String::new(), header("Location", &location)),
        Reply::NotFound => (404, "not found".to_string(), None),
        Reply::MethodNotAllowed => (405, "method not allowed".to_string(), None),
    };
    let mut response = Response::from_string(body).with_status_code(status);
    if let Some(header) = headers {
        response = response.with_header(header);
    }
    request.respond(response)
}

/// Serves the model until the listener shuts down. Requests are handled one
/// at a time, each replacing the model with the one its transition returns.
pub fn serve(server: Server, mut model: ViewModel) {
    tracing::info!("listening on {:?}", server.server_addr());

    for request in server.incoming_requests() {
        let method = request.method().clone();
        let url = request.url().to_string();

        let (next, reply) = route(model, &method, &url);
        model = next;

        tracing::event!(Level::DEBUG, "{} {} -> {:?}", method, url, reply_status(&reply));
        if let Err(error) = respond(request, reply) {
            tracing::warn!(%error, "failed to send response");
        }
    }
}

fn reply_status(reply: &Reply) -> u16 {
    match reply {
        Reply::Html(_) | Reply::Json(_) => 200,
        Reply::Redirect(_) => 303,
        Reply::NotFound => 404,
        Reply::MethodNotAllowed => 405,
    }
}

#[cfg(test)]
mod tests {
    use tracing_unwrap::ResultExt;

    use super::*;
    use crate::lib::models::Person;
    use crate::lib::sort::{SortDirection, ToggleMode};

    fn ready() -> ViewModel {
        let people: Vec<Person> =
            serde_json::from_str(include_str!("../../testdata/people.json")).unwrap_or_log();
        ViewModel::new(ToggleMode::Conventional).apply(ViewEvent::FetchCompleted(Ok(people)))
    }

    #[test]
    fn test_split_url_decodes_params() {
        let (path, params) = split_url("/search?q=new+york%21");
        assert_eq!(path, "/search");
        assert_eq!(params.get("q").map(String::as_str), Some("new york!"));
    }

    #[test]
    fn test_sort_route_clicks_column_and_redirects() {
        let (model, reply) = route(ready(), &Method::Get, "/sort?column=city");
        assert_eq!(reply, Reply::Redirect("/".to_string()));
        let direction = model.table().map(|t| t.direction("city"));
        assert_eq!(direction, Some(SortDirection::Ascending));
    }

    #[test]
    fn test_search_route_sets_query() {
        let (model, reply) = route(ready(), &Method::Get, "/search?q=Ada");
        assert_eq!(reply, Reply::Redirect("/".to_string()));
        assert_eq!(model.query(), "Ada");
        assert_eq!(model.visible_rows().len(), 1);
    }

    #[test]
    fn test_index_renders_page_and_accepts_query() {
        let (model, reply) = route(ready(), &Method::Get, "/?q=cork");
        assert_eq!(model.query(), "cork");
        match reply {
            Reply::Html(page) => assert!(page.contains("<td>Cork</td>") && !page.contains("<td>Bath</td>")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_rows_json_lists_visible_rows() {
        let (model, _) = route(ready(), &Method::Get, "/search?q=ireland");
        let (_, reply) = route(model, &Method::Get, "/rows.json");
        let Reply::Json(body) = reply else {
            panic!("expected json");
        };
        let rows: Vec<serde_json::Value> = serde_json::from_str(&body).unwrap_or_log();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["city"], "Cork");
        assert_eq!(rows[0]["Des"], "Brussels, Copenhagen, Madrid, Paris");
    }

    #[test]
    fn test_unknown_routes() {
        let (model, reply) = route(ready(), &Method::Get, "/favicon.ico");
        assert_eq!(reply, Reply::NotFound);
        let (_, reply) = route(model, &Method::Post, "/sort?column=city");
        assert_eq!(reply, Reply::MethodNotAllowed);
    }
}
