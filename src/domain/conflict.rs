// src/domain/conflict.rs

use chrono::{Days, NaiveDate};
use std::collections::{HashMap, HashSet};

use crate::domain::block::{Boundaries, OffboardingInterval};
use crate::domain::dates::{ge, gt, lt};
use crate::domain::property::PropertyStatus;
use crate::domain::reservation::{Reservation, ReservationStatus};

/// Why a reservation ended up (or did not end up) in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictReason {
    /// Check-in falls after the property's latest, still running, offboarding start.
    PostCutoff,
    /// Stay physically intersects an offboarding block.
    Overlap,
    Clean,
}

impl ConflictReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictReason::PostCutoff => "post-cutoff",
            ConflictReason::Overlap => "overlap",
            ConflictReason::Clean => "clean",
        }
    }
}

/// Which reservations a run cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportPolicy {
    /// Only stays that have not checked out yet, only cutoffs still running.
    Actionable,
    /// Audit of past data. `lookback_days` bounds how far back check-outs may be.
    Historical { lookback_days: Option<u32> },
}

impl ReportPolicy {
    pub fn is_historical(&self) -> bool {
        matches!(self, ReportPolicy::Historical { .. })
    }

    fn admits_check_out(&self, check_out: Option<NaiveDate>, today: NaiveDate) -> bool {
        match self {
            ReportPolicy::Actionable => ge(check_out, Some(today)),
            ReportPolicy::Historical { lookback_days: None } => true,
            ReportPolicy::Historical {
                lookback_days: Some(days),
            } => {
                let floor = today.checked_sub_days(Days::new(u64::from(*days)));
                ge(check_out, floor)
            }
        }
    }
}

/// One orphaned booking, ready for presentation.
#[derive(Debug, Clone, PartialEq)]
pub struct ConflictRecord {
    pub property_name: String,
    pub property_status: PropertyStatus,
    pub confirmation_code: String,
    pub reservation_status: ReservationStatus,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub reason: ConflictReason,
    /// Start of the block that triggered the classification.
    pub boundary_start: Option<NaiveDate>,
    /// End of the block that triggered the classification.
    pub boundary_end: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub reason: ConflictReason,
    pub trigger: Option<OffboardingInterval>,
}

impl Classification {
    fn clean() -> Self {
        Self {
            reason: ConflictReason::Clean,
            trigger: None,
        }
    }
}

/// Evaluates reservations against resolved offboarding boundaries.
///
/// Two rules, OR-combined:
/// - overlap: `check_in < block.end && check_out > block.start` for any offboarding block;
/// - post-cutoff: `check_in > max_start.start` while `max_start.end >= today`.
///
/// When both hold the reservation is labeled post-cutoff. The active-cutoff guard
/// is dropped under [`ReportPolicy::Historical`].
pub struct ConflictClassifier<'a> {
    boundaries: &'a Boundaries,
    policy: ReportPolicy,
    today: NaiveDate,
}

impl<'a> ConflictClassifier<'a> {
    pub fn new(boundaries: &'a Boundaries, policy: ReportPolicy, today: NaiveDate) -> Self {
        Self {
            boundaries,
            policy,
            today,
        }
    }

    pub fn classify(&self, r: &Reservation) -> Classification {
        if !r.status.can_conflict() {
            return Classification::clean();
        }
        let Some(boundary) = self.boundaries.get(&r.property_name) else {
            return Classification::clean();
        };
        if !self.policy.admits_check_out(r.check_out, self.today) {
            return Classification::clean();
        }

        let post_cutoff = boundary.max_start.filter(|m| {
            gt(r.check_in, m.start)
                && (self.policy.is_historical() || ge(m.end, Some(self.today)))
        });
        if let Some(m) = post_cutoff {
            return Classification {
                reason: ConflictReason::PostCutoff,
                trigger: Some(m),
            };
        }

        let overlapping = boundary
            .intervals
            .iter()
            .find(|iv| lt(r.check_in, iv.end) && gt(r.check_out, iv.start));
        match overlapping {
            Some(iv) => Classification {
                reason: ConflictReason::Overlap,
                trigger: Some(*iv),
            },
            None => Classification::clean(),
        }
    }

    /// Conflicting reservations in input order, one per confirmation code.
    pub fn find_conflicts(
        &self,
        reservations: &[Reservation],
        property_statuses: &HashMap<String, PropertyStatus>,
    ) -> Vec<ConflictRecord> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut out = Vec::new();

        for r in reservations {
            if seen.contains(r.confirmation_code.as_str()) {
                continue;
            }

            let c = self.classify(r);
            if c.reason == ConflictReason::Clean {
                continue;
            }
            seen.insert(r.confirmation_code.as_str());

            let property_status = property_statuses
                .get(&r.property_name)
                .copied()
                .unwrap_or(PropertyStatus::Unknown);

            out.push(ConflictRecord {
                property_name: r.property_name.clone(),
                property_status,
                confirmation_code: r.confirmation_code.clone(),
                reservation_status: r.status.clone(),
                check_in: r.check_in,
                check_out: r.check_out,
                reason: c.reason,
                boundary_start: c.trigger.and_then(|t| t.start),
                boundary_end: c.trigger.and_then(|t| t.end),
            });
        }

        out
    }
}
