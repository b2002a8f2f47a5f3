// src/domain/report.rs

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::domain::conflict::{ConflictReason, ConflictRecord};
use crate::domain::property::PropertyCutoff;

/// What one audit run hands to the notifier.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditReport {
    pub generated_on: NaiveDate,
    /// Earliest check-in first; rows without a check-in go last.
    pub conflicts: Vec<ConflictRecord>,
    /// Earliest cutoff first.
    pub offboarding_properties: Vec<PropertyCutoff>,
}

impl AuditReport {
    /// Orders both lists for presentation. Sorting is stable, so ties keep
    /// the order the classifier produced.
    pub fn assemble(
        generated_on: NaiveDate,
        mut conflicts: Vec<ConflictRecord>,
        mut offboarding_properties: Vec<PropertyCutoff>,
    ) -> Self {
        // `None` sorts before `Some` in Option's Ord, so key on (is_none, date).
        conflicts.sort_by_key(|c| (c.check_in.is_none(), c.check_in));
        offboarding_properties.sort_by_key(|p| p.cutoff);

        Self {
            generated_on,
            conflicts,
            offboarding_properties,
        }
    }

    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }

    /// Conflicts bucketed by property name, each bucket still in check-in order.
    pub fn conflicts_by_property(&self) -> BTreeMap<&str, Vec<&ConflictRecord>> {
        let mut out: BTreeMap<&str, Vec<&ConflictRecord>> = BTreeMap::new();
        for c in &self.conflicts {
            out.entry(c.property_name.as_str()).or_default().push(c);
        }
        out
    }

    pub fn count_by_reason(&self, reason: ConflictReason) -> usize {
        self.conflicts.iter().filter(|c| c.reason == reason).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::property::PropertyStatus;
    use crate::domain::reservation::ReservationStatus;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn conflict(code: &str, property: &str, check_in: Option<NaiveDate>, reason: ConflictReason) -> ConflictRecord {
        ConflictRecord {
            property_name: property.to_string(),
            property_status: PropertyStatus::Inactive,
            confirmation_code: code.to_string(),
            reservation_status: ReservationStatus::Confirmed,
            check_in,
            check_out: check_in,
            reason,
            boundary_start: None,
            boundary_end: None,
        }
    }

    fn cutoff(property: &str, date: NaiveDate) -> PropertyCutoff {
        PropertyCutoff {
            property_name: property.to_string(),
            status: PropertyStatus::Inactive,
            country: None,
            city: None,
            cutoff: date,
        }
    }

    #[test]
    fn orders_conflicts_by_check_in_with_missing_last() {
        let report = AuditReport::assemble(
            ymd(2024, 1, 1),
            vec![
                conflict("C", "Casa Sol", Some(ymd(2024, 3, 1)), ConflictReason::Overlap),
                conflict("X", "Casa Sol", None, ConflictReason::Overlap),
                conflict("A", "Casa Mar", Some(ymd(2024, 1, 5)), ConflictReason::PostCutoff),
                conflict("B", "Casa Sol", Some(ymd(2024, 1, 5)), ConflictReason::Overlap),
            ],
            vec![],
        );

        let codes: Vec<_> = report
            .conflicts
            .iter()
            .map(|c| c.confirmation_code.as_str())
            .collect();
        assert_eq!(codes, vec!["A", "B", "C", "X"]);
    }

    #[test]
    fn orders_cutoffs_ascending() {
        let report = AuditReport::assemble(
            ymd(2024, 1, 1),
            vec![],
            vec![
                cutoff("Casa Sol", ymd(2024, 6, 1)),
                cutoff("Casa Mar", ymd(2024, 2, 1)),
            ],
        );

        assert!(!report.has_conflicts());
        assert_eq!(report.offboarding_properties[0].property_name, "Casa Mar");
        assert_eq!(report.offboarding_properties[1].property_name, "Casa Sol");
    }

    #[test]
    fn groups_and_counts() {
        let report = AuditReport::assemble(
            ymd(2024, 1, 1),
            vec![
                conflict("A", "Casa Sol", Some(ymd(2024, 1, 9)), ConflictReason::Overlap),
                conflict("B", "Casa Mar", Some(ymd(2024, 1, 2)), ConflictReason::PostCutoff),
                conflict("C", "Casa Sol", Some(ymd(2024, 1, 3)), ConflictReason::PostCutoff),
            ],
            vec![],
        );

        let groups = report.conflicts_by_property();
        assert_eq!(groups.keys().copied().collect::<Vec<_>>(), vec!["Casa Mar", "Casa Sol"]);
        let sol: Vec<_> = groups["Casa Sol"]
            .iter()
            .map(|c| c.confirmation_code.as_str())
            .collect();
        assert_eq!(sol, vec!["C", "A"]);

        assert_eq!(report.count_by_reason(ConflictReason::PostCutoff), 2);
        assert_eq!(report.count_by_reason(ConflictReason::Overlap), 1);
    }
}
