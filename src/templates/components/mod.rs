use chrono::NaiveDate;
use maud::{html, Markup};

pub mod tables;

pub use tables::{conflict_table, cutoff_table};

pub(crate) const CELL: &str = "padding: 8px; border: 1px solid #ccc;";
pub(crate) const HEAD_CELL: &str = "padding: 10px; border: 1px solid #ccc; background-color: #f2f2f2;";

pub fn section(title: &str, body: Markup) -> Markup {
    html! {
        div style="margin-top: 24px;" {
            h3 style="margin-bottom: 8px;" { (title) }
            (body)
        }
    }
}

pub fn date_cell(d: Option<NaiveDate>) -> String {
    d.map(|d| d.to_string()).unwrap_or_else(|| "n/a".to_string())
}
