// src/domain/reservation.rs

use chrono::NaiveDate;

/// Reservation lifecycle as reported by the channel manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReservationStatus {
    Confirmed,
    Reserved,
    Cancelled,
    /// Inquiries, declined, expired... kept verbatim for the report.
    Other(String),
}

impl ReservationStatus {
    pub fn parse(raw: &str) -> Self {
        let s = raw.trim().to_lowercase();
        match s.as_str() {
            "confirmed" => ReservationStatus::Confirmed,
            "reserved" => ReservationStatus::Reserved,
            "cancelled" | "canceled" => ReservationStatus::Cancelled,
            _ => ReservationStatus::Other(s),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Reserved => "reserved",
            ReservationStatus::Cancelled => "cancelled",
            ReservationStatus::Other(s) => s.as_str(),
        }
    }

    /// Only real bookings can collide with an offboarding.
    pub fn can_conflict(&self) -> bool {
        matches!(
            self,
            ReservationStatus::Confirmed | ReservationStatus::Reserved
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reservation {
    pub confirmation_code: String,
    pub property_name: String,
    pub status: ReservationStatus,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parsing_is_lenient_about_case_and_spelling() {
        assert_eq!(ReservationStatus::parse(" Confirmed"), ReservationStatus::Confirmed);
        assert_eq!(ReservationStatus::parse("RESERVED"), ReservationStatus::Reserved);
        assert_eq!(ReservationStatus::parse("canceled"), ReservationStatus::Cancelled);
        assert_eq!(
            ReservationStatus::parse("Inquiry"),
            ReservationStatus::Other("inquiry".to_string())
        );
    }

    #[test]
    fn only_confirmed_and_reserved_can_conflict() {
        assert!(ReservationStatus::Confirmed.can_conflict());
        assert!(ReservationStatus::Reserved.can_conflict());
        assert!(!ReservationStatus::Cancelled.can_conflict());
        assert!(!ReservationStatus::Other("inquiry".into()).can_conflict());
    }
}
