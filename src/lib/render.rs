use std::fmt::Write;

use url::form_urlencoded;

use super::view::{Table, ViewModel, ViewState};

const STYLE: &str = "body{font-family:sans-serif}table{border-collapse:collapse}\
th,td{border:1px solid #ccc;padding:4px 8px}th a{color:inherit;text-decoration:none}\
th[data-direction=ascending] a::after{content:\" \\25B2\"}\
th[data-direction=descending] a::after{content:\" \\25BC\"}.error{color:#b00}";

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders the whole page for the current model.
pub fn render_page(model: &ViewModel) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>Locations</title>");
    let _ = write!(html, "<style>{}</style></head><body>", STYLE);
    html.push_str("<h1>Locations</h1>");
    let _ = write!(
        html,
        "<form action=\"/search\" method=\"get\"><input name=\"q\" value=\"{}\" placeholder=\"Search here...\"></form>",
        escape(model.query())
    );

    match model.state() {
        ViewState::Loading => html.push_str("<p class=\"loading\">Loading...</p>"),
        ViewState::Failed(reason) => {
            let _ = write!(html, "<p class=\"error\">Could not load locations: {}</p>", escape(reason));
        }
        ViewState::Ready(table) => render_table(&mut html, model, table),
    }

    html.push_str("</body></html>\n");
    html
}

fn render_table(html: &mut String, model: &ViewModel, table: &Table) {
    let headers = &table.locations.headers;

    html.push_str("<table><thead><tr>");
    for header in headers {
        let column: String = form_urlencoded::byte_serialize(header.as_bytes()).collect();
        let _ = write!(
            html,
            "<th data-direction=\"{}\"><a href=\"/sort?column={}\">{}</a></th>",
            table.direction(header).as_str(),
            escape(&column),
            escape(header)
        );
    }
    html.push_str("</tr></thead><tbody>");

    for row in model.visible_rows() {
        html.push_str("<tr>");
        for header in headers {
            let text = row.get(header).map(|c| c.to_string()).unwrap_or_default();
            let _ = write!(html, "<td>{}</td>", escape(&text));
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table>");
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};
    use tracing_unwrap::ResultExt;

    use super::*;
    use crate::lib::models::Person;
    use crate::lib::sort::ToggleMode;
    use crate::lib::view::ViewEvent;

    fn ready() -> ViewModel {
        let people: Vec<Person> =
            serde_json::from_str(include_str!("../../testdata/people.json")).unwrap_or_log();
        ViewModel::new(ToggleMode::Conventional).apply(ViewEvent::FetchCompleted(Ok(people)))
    }

    fn select_text(html: &Html, selector: &str) -> Vec<String> {
        let selector = Selector::parse(selector).unwrap_or_log();
        html.select(&selector).map(|e| e.text().collect::<String>()).collect()
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("<a href='x'>&\"</a>"), "&lt;a href=&#39;x&#39;&gt;&amp;&quot;&lt;/a&gt;");
    }

    #[test]
    fn test_table_has_one_cell_per_header() {
        let model = ready();
        let html = Html::parse_document(&render_page(&model));

        let headers = select_text(&html, "thead th");
        assert_eq!(headers, model.table().map(|t| t.locations.headers.clone()).unwrap_or_default());

        let rows = Selector::parse("tbody tr").unwrap_or_log();
        let cells = Selector::parse("td").unwrap_or_log();
        let rows: Vec<_> = html.select(&rows).collect();
        assert_eq!(rows.len(), 3);
        for row in rows {
            assert_eq!(row.select(&cells).count(), headers.len());
        }
        assert_eq!(select_text(&html, "tbody tr:nth-child(2) td:nth-child(1)"), vec!["Ada"]);
        assert_eq!(select_text(&html, "tbody tr:nth-child(2) td:nth-child(4)"), vec!["74820"]);
    }

    #[test]
    fn test_headers_link_to_sort_and_carry_direction() {
        let model = ready().apply(ViewEvent::ColumnClicked("StreetName".into()));
        let html = Html::parse_document(&render_page(&model));

        let link = Selector::parse("th:nth-child(6) a").unwrap_or_log();
        let link = html.select(&link).next().map(|a| a.value().attr("href").map(str::to_string));
        assert_eq!(link, Some(Some("/sort?column=StreetName".to_string())));

        let th = Selector::parse("th[data-direction=ascending]").unwrap_or_log();
        assert_eq!(html.select(&th).count(), 1);
    }

    #[test]
    fn test_search_input_keeps_query_and_filters_rows() {
        let model = ready().apply(ViewEvent::QueryChanged("<cork>".into()));
        let page = render_page(&model);
        let html = Html::parse_document(&page);

        let input = Selector::parse("input[name=q]").unwrap_or_log();
        let input = html.select(&input).next().map(|i| {
            (
                i.value().attr("value").map(str::to_string),
                i.value().attr("placeholder").map(str::to_string),
            )
        });
        assert_eq!(
            input,
            Some((Some("<cork>".to_string()), Some("Search here...".to_string())))
        );
        assert!(select_text(&html, "tbody tr").is_empty());
        assert!(!page.contains("<cork>"));
    }

    #[test]
    fn test_failed_and_loading_states() {
        let loading = ViewModel::new(ToggleMode::Conventional);
        let html = Html::parse_document(&render_page(&loading));
        assert_eq!(select_text(&html, "p.loading"), vec!["Loading..."]);
        assert!(select_text(&html, "table").is_empty());

        let failed = loading.apply(ViewEvent::FetchCompleted(Ok(Vec::new())));
        let html = Html::parse_document(&render_page(&failed));
        assert_eq!(
            select_text(&html, "p.error"),
            vec!["Could not load locations: no locations to flatten"]
        );
    }
}
