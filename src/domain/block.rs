// src/domain/block.rs

use chrono::NaiveDate;
use std::collections::HashMap;

/// Interval code the PMS uses for "property leaving the portfolio" blocks.
pub const OFFBOARDING_CODE: &str = "BLOOFF";

/// A calendar block as read from the block table.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub property_name: String,
    pub interval_code: String,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl Block {
    pub fn is_offboarding(&self) -> bool {
        self.interval_code.trim().eq_ignore_ascii_case(OFFBOARDING_CODE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffboardingInterval {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// Everything the classifier needs to know about one property's exit.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OffboardingBoundary {
    /// Block with the latest start. `None` only if no block has a readable start.
    pub max_start: Option<OffboardingInterval>,
    /// All offboarding intervals, in the order they were read.
    pub intervals: Vec<OffboardingInterval>,
}

impl OffboardingBoundary {
    fn push(&mut self, interval: OffboardingInterval) {
        // Strict `>` keeps the first block seen on equal start dates.
        let replaces = match (self.max_start, interval.start) {
            (_, None) => false,
            (None, Some(_)) => true,
            (Some(current), Some(start)) => current.start.map_or(true, |c| start > c),
        };
        if replaces {
            self.max_start = Some(interval);
        }
        self.intervals.push(interval);
    }
}

/// Boundaries keyed by property name. Properties without offboarding blocks are absent.
pub type Boundaries = HashMap<String, OffboardingBoundary>;

/// Groups the offboarding blocks by property and derives each property's latest cutoff.
pub fn resolve_boundaries(blocks: &[Block]) -> Boundaries {
    let mut out = Boundaries::new();

    for block in blocks.iter().filter(|b| b.is_offboarding()) {
        out.entry(block.property_name.clone())
            .or_default()
            .push(OffboardingInterval {
                start: block.start,
                end: block.end,
            });
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    fn block(property: &str, code: &str, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Block {
        Block {
            property_name: property.to_string(),
            interval_code: code.to_string(),
            start,
            end,
        }
    }

    #[test]
    fn picks_latest_start_and_keeps_every_interval() {
        let blocks = vec![
            block("Casa Sol", "BLOOFF", ymd(2024, 1, 1), ymd(2024, 1, 10)),
            block("Casa Sol", "BLOOFF", ymd(2024, 3, 1), ymd(2024, 3, 31)),
            block("Casa Sol", "BLOOFF", ymd(2024, 2, 1), ymd(2024, 2, 5)),
        ];

        let b = resolve_boundaries(&blocks);
        let casa = &b["Casa Sol"];

        assert_eq!(casa.intervals.len(), 3);
        assert_eq!(casa.max_start.unwrap().start, ymd(2024, 3, 1));
        assert_eq!(casa.max_start.unwrap().end, ymd(2024, 3, 31));
    }

    #[test]
    fn ignores_other_interval_codes() {
        let blocks = vec![
            block("Casa Sol", "BLOWNER", ymd(2024, 5, 1), ymd(2024, 5, 2)),
            block("Casa Luna", "MAINT", ymd(2024, 5, 1), ymd(2024, 5, 2)),
            block("Casa Sol", " blooff ", ymd(2024, 1, 1), ymd(2024, 1, 10)),
        ];

        let b = resolve_boundaries(&blocks);

        assert_eq!(b.len(), 1);
        assert!(!b.contains_key("Casa Luna"));
        assert_eq!(b["Casa Sol"].intervals.len(), 1);
        assert_eq!(b["Casa Sol"].max_start.unwrap().start, ymd(2024, 1, 1));
    }

    #[test]
    fn equal_starts_keep_first_block() {
        let blocks = vec![
            block("Casa Sol", "BLOOFF", ymd(2024, 1, 1), ymd(2024, 1, 10)),
            block("Casa Sol", "BLOOFF", ymd(2024, 1, 1), ymd(2024, 6, 30)),
        ];

        let b = resolve_boundaries(&blocks);
        assert_eq!(b["Casa Sol"].max_start.unwrap().end, ymd(2024, 1, 10));
    }

    #[test]
    fn missing_start_never_becomes_max_start() {
        let blocks = vec![
            block("Casa Sol", "BLOOFF", None, ymd(2024, 9, 1)),
            block("Casa Sol", "BLOOFF", ymd(2024, 1, 1), ymd(2024, 1, 10)),
        ];
        let b = resolve_boundaries(&blocks);
        assert_eq!(b["Casa Sol"].max_start.unwrap().start, ymd(2024, 1, 1));
        assert_eq!(b["Casa Sol"].intervals.len(), 2);

        let only_missing = vec![block("Casa Mar", "BLOOFF", None, None)];
        let b = resolve_boundaries(&only_missing);
        assert_eq!(b["Casa Mar"].max_start, None);
    }
}
