use maud::{html, Markup};

use crate::domain::conflict::ConflictReason;
use crate::domain::report::AuditReport;
use crate::templates::components::{conflict_table, cutoff_table, section};
use crate::templates::layouts::email::email_layout;

pub fn alert_subject(report: &AuditReport) -> String {
    format!(
        "URGENT: {} reservations on offboarding properties",
        report.conflicts.len()
    )
}

pub fn alert_page(report: &AuditReport) -> Markup {
    let by_property = report.conflicts_by_property();

    email_layout(
        &alert_subject(report),
        html! {
            h2 style="color: #D32F2F;" { "Action required: reservations on offboarding properties" }
            p {
                "The audit of " (report.generated_on.to_string()) " found "
                b { (report.conflicts.len()) " reservations" }
                " across " (by_property.len()) " properties that are leaving the portfolio."
            }
            ul {
                li { (report.count_by_reason(ConflictReason::PostCutoff)) " booked after the offboarding cutoff" }
                li { (report.count_by_reason(ConflictReason::Overlap)) " overlapping an offboarding block" }
            }
            p { "These reservations need to be moved or cancelled:" }

            (conflict_table(&report.conflicts))

            (section("By property", html! {
                ul {
                    @for (property, rows) in &by_property {
                        li { b { (property) } ": " (rows.len()) }
                    }
                }
            }))

            @if !report.offboarding_properties.is_empty() {
                (section("Properties under offboarding", cutoff_table(&report.offboarding_properties)))
            }
        },
    )
}
