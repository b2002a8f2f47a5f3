// src/notifier.rs
use std::fs;
use std::path::PathBuf;

use crate::domain::report::AuditReport;
use crate::errors::AuditError;
use crate::spreadsheets::build_report_workbook;
use crate::templates::alert_page;

/// Delivers an assembled report somewhere a human will see it.
pub trait Notifier {
    fn notify(&self, report: &AuditReport) -> Result<(), AuditError>;
}

/// Writes `report.html` and `report.xlsx` into a directory instead of sending mail.
pub struct DryRunNotifier {
    out_dir: PathBuf,
}

impl DryRunNotifier {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }
}

impl Notifier for DryRunNotifier {
    fn notify(&self, report: &AuditReport) -> Result<(), AuditError> {
        fs::create_dir_all(&self.out_dir)?;

        let html_path = self.out_dir.join("report.html");
        fs::write(&html_path, alert_page(report).into_string())?;

        let xlsx_path = self.out_dir.join("report.xlsx");
        fs::write(&xlsx_path, build_report_workbook(report)?)?;

        tracing::info!(
            html = %html_path.display(),
            xlsx = %xlsx_path.display(),
            "dry run: report written"
        );
        Ok(())
    }
}
