use rusqlite::{params, Connection};

use crate::db::views::View;
use crate::domain::dates::parse_column_date;
use crate::domain::reservation::{Reservation, ReservationStatus};
use crate::errors::AuditError;

/// Confirmed and reserved bookings with their listing nickname, ordered by check-in.
/// Cancelled rows never leave the database.
pub fn fetch_active_reservations(conn: &Connection) -> Result<Vec<Reservation>, AuditError> {
    let view = View::Reservations;
    let mut stmt = conn
        .prepare(view.sql())
        .map_err(|e| AuditError::DbError(format!("{}: {e}", view.name())))?;

    let rows = stmt
        .query_map(
            params![
                ReservationStatus::Confirmed.as_str(),
                ReservationStatus::Reserved.as_str()
            ],
            |row| {
                let status: String = row.get(2)?;
                let check_in: Option<String> = row.get(3)?;
                let check_out: Option<String> = row.get(4)?;
                Ok(Reservation {
                    property_name: row.get(0)?,
                    confirmation_code: row.get(1)?,
                    status: ReservationStatus::parse(&status),
                    check_in: parse_column_date(check_in.as_deref()),
                    check_out: parse_column_date(check_out.as_deref()),
                })
            },
        )
        .map_err(|e| AuditError::DbError(format!("{}: {e}", view.name())))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| AuditError::DbError(format!("{}: {e}", view.name())))?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::utils::seeded_db;
    use chrono::NaiveDate;

    #[test]
    fn returns_only_bookable_statuses_with_parsed_dates() {
        let db = seeded_db(
            "reservations_fetch",
            r#"
            INSERT INTO guesty_listing (id, nickname, active) VALUES ('L1', 'Casa Sol', 0);
            INSERT INTO guesty_reservation (id, listing_id, confirmation_code, status, check_in, check_out) VALUES
              ('R1', 'L1', 'HM-B', 'Confirmed', '2024-02-01', '2024-02-03'),
              ('R2', 'L1', 'HM-A', 'reserved',  '2024-01-05 15:00:00', '2024-01-08'),
              ('R3', 'L1', 'HM-C', 'canceled',  '2024-01-05', '2024-01-08'),
              ('R4', 'L1', 'HM-D', 'inquiry',   '2024-01-05', '2024-01-08'),
              ('R5', 'L1', 'HM-E', 'confirmed', 'N/A', ' 10/ 03/2024');
            "#,
        );

        let got = db.with_conn(fetch_active_reservations).unwrap();
        let codes: Vec<_> = got.iter().map(|r| r.confirmation_code.as_str()).collect();
        assert_eq!(codes, vec!["HM-A", "HM-B", "HM-E"]);

        assert_eq!(got[0].status, ReservationStatus::Reserved);
        assert_eq!(got[0].check_in, NaiveDate::from_ymd_opt(2024, 1, 5));
        assert_eq!(got[0].property_name, "Casa Sol");

        assert_eq!(got[2].check_in, None);
        assert_eq!(got[2].check_out, NaiveDate::from_ymd_opt(2024, 3, 10));
    }
}
