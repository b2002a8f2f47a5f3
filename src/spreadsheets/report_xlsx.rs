use rust_xlsxwriter::{Format, Workbook, Worksheet};

use crate::domain::report::AuditReport;
use crate::errors::AuditError;
use crate::templates::components::date_cell;

fn xlsx_err(what: &str) -> impl Fn(rust_xlsxwriter::XlsxError) -> AuditError + '_ {
    move |e| AuditError::XlsxError(format!("Failed to write {what}: {e}"))
}

fn write_headers(ws: &mut Worksheet, headers: &[&str], bold: &Format) -> Result<(), AuditError> {
    for (col, header) in headers.iter().enumerate() {
        ws.write_string_with_format(0, col as u16, *header, bold)
            .map_err(xlsx_err(header))?;
    }
    Ok(())
}

/// Two sheets: the conflicts in check-in order, then the properties under
/// offboarding in cutoff order. Dates are written as ISO text.
pub fn build_report_workbook(report: &AuditReport) -> Result<Vec<u8>, AuditError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    let conflicts = workbook.add_worksheet();
    conflicts
        .set_name("Conflicts")
        .map_err(xlsx_err("sheet name"))?;
    write_headers(
        conflicts,
        &[
            "Property",
            "Property Status",
            "Confirmation Code",
            "Reservation Status",
            "Check-in",
            "Check-out",
            "Reason",
            "Block Start",
            "Block End",
        ],
        &bold,
    )?;

    for (i, c) in report.conflicts.iter().enumerate() {
        let r = (i + 1) as u32;
        conflicts
            .write_string(r, 0, &c.property_name)
            .map_err(xlsx_err("property"))?;
        conflicts
            .write_string(r, 1, c.property_status.as_str())
            .map_err(xlsx_err("property status"))?;
        conflicts
            .write_string(r, 2, &c.confirmation_code)
            .map_err(xlsx_err("confirmation code"))?;
        conflicts
            .write_string(r, 3, c.reservation_status.as_str())
            .map_err(xlsx_err("reservation status"))?;
        conflicts
            .write_string(r, 4, date_cell(c.check_in))
            .map_err(xlsx_err("check-in"))?;
        conflicts
            .write_string(r, 5, date_cell(c.check_out))
            .map_err(xlsx_err("check-out"))?;
        conflicts
            .write_string(r, 6, c.reason.as_str())
            .map_err(xlsx_err("reason"))?;
        conflicts
            .write_string(r, 7, date_cell(c.boundary_start))
            .map_err(xlsx_err("block start"))?;
        conflicts
            .write_string(r, 8, date_cell(c.boundary_end))
            .map_err(xlsx_err("block end"))?;
    }

    let properties = workbook.add_worksheet();
    properties
        .set_name("Offboarding Properties")
        .map_err(xlsx_err("sheet name"))?;
    write_headers(
        properties,
        &["Property", "Status", "City", "Country", "Cutoff"],
        &bold,
    )?;

    for (i, p) in report.offboarding_properties.iter().enumerate() {
        let r = (i + 1) as u32;
        properties
            .write_string(r, 0, &p.property_name)
            .map_err(xlsx_err("property"))?;
        properties
            .write_string(r, 1, p.status.as_str())
            .map_err(xlsx_err("status"))?;
        properties
            .write_string(r, 2, p.city.as_deref().unwrap_or(""))
            .map_err(xlsx_err("city"))?;
        properties
            .write_string(r, 3, p.country.as_deref().unwrap_or(""))
            .map_err(xlsx_err("country"))?;
        properties
            .write_string(r, 4, p.cutoff.to_string())
            .map_err(xlsx_err("cutoff"))?;
    }

    workbook
        .save_to_buffer()
        .map_err(|e| AuditError::XlsxError(format!("Failed to save workbook: {}", e)))
}
