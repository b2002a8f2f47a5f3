use rusqlite::{params, Connection};

use crate::db::views::View;
use crate::errors::AuditError;

#[derive(Debug, Clone, PartialEq)]
pub struct RelationColumns {
    pub view: View,
    pub relation: &'static str,
    /// `(name, declared type)`; empty when the relation does not exist.
    pub columns: Vec<(String, String)>,
}

/// Column listing for every relation the audit reads. Relation names come
/// from [`View::relations`] and are bound as parameters.
pub fn inspect_views(conn: &Connection) -> Result<Vec<RelationColumns>, AuditError> {
    let mut stmt = conn
        .prepare("SELECT name, type FROM pragma_table_info(?1) ORDER BY cid")
        .map_err(|e| AuditError::DbError(format!("inspect: {e}")))?;

    let mut out = Vec::new();
    for view in View::ALL {
        for relation in view.relations() {
            let rows = stmt
                .query_map(params![relation], |row| {
                    Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
                })
                .map_err(|e| AuditError::DbError(format!("inspect {relation}: {e}")))?;

            let mut columns = Vec::new();
            for r in rows {
                columns.push(r.map_err(|e| AuditError::DbError(format!("inspect {relation}: {e}")))?);
            }

            out.push(RelationColumns {
                view,
                relation,
                columns,
            });
        }
    }
    Ok(out)
}
