use rusqlite::{params, Connection};

use crate::db::views::View;
use crate::domain::block::{Block, OFFBOARDING_CODE};
use crate::domain::dates::parse_column_date;
use crate::errors::AuditError;

/// All `BLOOFF` blocks, grouped by listing nickname, in insertion order per listing.
pub fn fetch_offboarding_blocks(conn: &Connection) -> Result<Vec<Block>, AuditError> {
    let view = View::OffboardingBlocks;
    let mut stmt = conn
        .prepare(view.sql())
        .map_err(|e| AuditError::DbError(format!("{}: {e}", view.name())))?;

    let rows = stmt
        .query_map(params![OFFBOARDING_CODE], |row| {
            let start: Option<String> = row.get(2)?;
            let end: Option<String> = row.get(3)?;
            Ok(Block {
                property_name: row.get(0)?,
                interval_code: row.get(1)?,
                start: parse_column_date(start.as_deref()),
                end: parse_column_date(end.as_deref()),
            })
        })
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
    fn keeps_offboarding_blocks_only() {
        let db = seeded_db(
            "blocks_fetch",
            r#"
            INSERT INTO guesty_listing (id, nickname) VALUES ('L1', 'Casa Sol'), ('L2', 'Casa Mar');
            INSERT INTO block_gold (id, listing_id, interval_code, start_date, end_date) VALUES
              (1, 'L1', 'BLOOFF',  '2024-01-01', '2024-01-10'),
              (2, 'L1', 'BLOWNER', '2024-02-01', '2024-02-10'),
              (3, 'L2', ' blooff', '01/03/2024', 'garbage'),
              (4, 'L1', 'BLOOFF',  '2024-05-01', '2024-05-31');
            "#,
        );

        let got = db.with_conn(fetch_offboarding_blocks).unwrap();
        assert_eq!(got.len(), 3);

        // Casa Mar sorts first; its malformed end date reads as missing.
        assert_eq!(got[0].property_name, "Casa Mar");
        assert_eq!(got[0].start, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(got[0].end, None);

        assert_eq!(got[1].start, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(got[2].start, NaiveDate::from_ymd_opt(2024, 5, 1));
        assert!(got.iter().all(|b| b.is_offboarding()));
    }
}
