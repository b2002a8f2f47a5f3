// src/job.rs
use chrono::NaiveDate;
use tracing::{error, info, warn};

use crate::db::{
    fetch_active_reservations, fetch_listing_activity, fetch_offboarding_blocks,
    fetch_property_cutoffs, Database, View,
};
use crate::domain::block::resolve_boundaries;
use crate::domain::conflict::{ConflictClassifier, ConflictReason, ReportPolicy};
use crate::domain::report::AuditReport;
use crate::errors::AuditError;
use crate::notifier::Notifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Could not open the data source; nothing was evaluated or sent.
    SourceUnavailable,
    /// Evaluated, nothing to report, nothing sent.
    NoConflicts,
    Notified,
    /// Conflicts found but delivery failed.
    NotificationFailed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub status: RunStatus,
    pub report: AuditReport,
}

/// A failed query is logged and treated as returning no rows.
fn or_empty<T: Default>(view: View, result: Result<T, AuditError>) -> T {
    result.unwrap_or_else(|e| {
        error!(view = view.name(), error = %e, "query failed, continuing with empty result");
        T::default()
    })
}

/// Reads the four views over one read-only connection and runs the classifier.
/// Only an unreachable data source is an error; individual query failures
/// degrade to empty results.
pub fn collect_report(
    db: &Database,
    policy: ReportPolicy,
    today: NaiveDate,
) -> Result<AuditReport, AuditError> {
    let (reservations, blocks, cutoffs, activity) = db.with_conn(|conn| {
        Ok((
            or_empty(View::Reservations, fetch_active_reservations(conn)),
            or_empty(View::OffboardingBlocks, fetch_offboarding_blocks(conn)),
            or_empty(View::PropertyCutoffs, fetch_property_cutoffs(conn)),
            or_empty(View::ListingActivity, fetch_listing_activity(conn)),
        ))
    })?;

    let boundaries = resolve_boundaries(&blocks);
    info!(
        reservations = reservations.len(),
        blocks = blocks.len(),
        offboarding_properties = boundaries.len(),
        "data loaded"
    );

    let classifier = ConflictClassifier::new(&boundaries, policy, today);
    let conflicts = classifier.find_conflicts(&reservations, &activity);

    Ok(AuditReport::assemble(today, conflicts, cutoffs))
}

/// One scheduled run: collect, classify, and notify only when something needs fixing.
pub fn run_job(
    db: &Database,
    policy: ReportPolicy,
    today: NaiveDate,
    notifier: &dyn Notifier,
) -> RunSummary {
    info!(%today, ?policy, db = %db.path().display(), "audit run started");

    let report = match collect_report(db, policy, today) {
        Ok(report) => report,
        Err(e) => {
            error!(error = %e, "data source unavailable, aborting run");
            return RunSummary {
                status: RunStatus::SourceUnavailable,
                report: AuditReport::assemble(today, Vec::new(), Vec::new()),
            };
        }
    };

    if !report.has_conflicts() {
        info!(
            offboarding_properties = report.offboarding_properties.len(),
            "no conflicts, no alert sent"
        );
        return RunSummary {
            status: RunStatus::NoConflicts,
            report,
        };
    }

    warn!(
        conflicts = report.conflicts.len(),
        post_cutoff = report.count_by_reason(ConflictReason::PostCutoff),
        overlap = report.count_by_reason(ConflictReason::Overlap),
        "conflicts found, sending alert"
    );

    let status = match notifier.notify(&report) {
        Ok(()) => RunStatus::Notified,
        Err(e) => {
            error!(error = %e, "alert delivery failed");
            RunStatus::NotificationFailed
        }
    };

    RunSummary { status, report }
}
