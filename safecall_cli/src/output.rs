use safecall::{ErrorResponse, StatusName};
use serde::Serialize;
use tabled::{Table, Tabled};

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Tabled, Serialize)]
struct StatusRow {
    #[tabled(rename = "Code")]
    #[serde(rename = "Code")]
    code: u16,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Class")]
    #[serde(rename = "Class")]
    class: String,
}

#[derive(Tabled)]
struct ErrorResponseRow {
    #[tabled(rename = "Status")]
    status: u16,
    #[tabled(rename = "Body")]
    body: String,
}

// -- Row builders --

fn build_status_rows(entries: &[StatusName]) -> Vec<StatusRow> {
    entries
        .iter()
        .map(|s| StatusRow {
            code: s.code(),
            name: s.as_str().to_string(),
            class: s.class().to_string(),
        })
        .collect()
}

fn build_error_response_row(response: &ErrorResponse) -> ErrorResponseRow {
    ErrorResponseRow {
        status: response.status,
        body: response.body.to_string(),
    }
}

// -- Table output --

pub fn print_status_table(entries: &[StatusName]) {
    println!("{}", Table::new(build_status_rows(entries)));
}

pub fn print_error_response_table(response: &ErrorResponse) {
    println!("{}", Table::new([build_error_response_row(response)]));
}

// -- JSON output --

pub fn print_status_json(entries: &[StatusName]) {
    print_json(&build_status_rows(entries));
}

pub fn print_json<T: Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}
