use maud::{html, Markup};

use crate::domain::conflict::{ConflictReason, ConflictRecord};
use crate::domain::property::{PropertyCutoff, PropertyStatus};
use crate::templates::components::{date_cell, CELL, HEAD_CELL};

fn reason_label(reason: ConflictReason) -> &'static str {
    match reason {
        ConflictReason::PostCutoff => "Booked after cutoff",
        ConflictReason::Overlap => "Overlaps offboarding block",
        ConflictReason::Clean => "Clean",
    }
}

fn status_style(status: PropertyStatus) -> String {
    match status {
        PropertyStatus::Inactive => format!("{CELL} color: red;"),
        _ => CELL.to_string(),
    }
}

pub fn conflict_table(conflicts: &[ConflictRecord]) -> Markup {
    html! {
        table style="width: 100%; border-collapse: collapse; text-align: left;" {
            tr {
                th style=(HEAD_CELL) { "Property" }
                th style=(HEAD_CELL) { "Status" }
                th style=(HEAD_CELL) { "Confirmation" }
                th style=(HEAD_CELL) { "Reservation" }
                th style=(HEAD_CELL) { "Check-in" }
                th style=(HEAD_CELL) { "Check-out" }
                th style=(HEAD_CELL) { "Reason" }
                th style=(HEAD_CELL) { "Offboarding block" }
            }
            @for c in conflicts {
                tr {
                    td style=(CELL) { b { (c.property_name) } }
                    td style=(status_style(c.property_status)) { (c.property_status.as_str()) }
                    td style=(CELL) { (c.confirmation_code) }
                    td style=(CELL) { (c.reservation_status.as_str()) }
                    td style=(CELL) { (date_cell(c.check_in)) }
                    td style=(CELL) { (date_cell(c.check_out)) }
                    td style=(CELL) { (reason_label(c.reason)) }
                    td style=(CELL) {
                        (date_cell(c.boundary_start)) " to " (date_cell(c.boundary_end))
                    }
                }
            }
        }
    }
}

pub fn cutoff_table(properties: &[PropertyCutoff]) -> Markup {
    html! {
        table style="width: 100%; border-collapse: collapse; text-align: left;" {
            tr {
                th style=(HEAD_CELL) { "Property" }
                th style=(HEAD_CELL) { "Status" }
                th style=(HEAD_CELL) { "City" }
                th style=(HEAD_CELL) { "Country" }
                th style=(HEAD_CELL) { "Cutoff" }
            }
            @for p in properties {
                tr {
                    td style=(CELL) { (p.property_name) }
                    td style=(status_style(p.status)) { (p.status.as_str()) }
                    td style=(CELL) { (p.city.as_deref().unwrap_or("")) }
                    td style=(CELL) { (p.country.as_deref().unwrap_or("")) }
                    td style=(CELL) { (p.cutoff.to_string()) }
                }
            }
        }
    }
}
