// src/mailer.rs

use base64::Engine;
use reqwest::blocking::Client;
use serde::Serialize;

use crate::config::MailConfig;
use crate::domain::report::AuditReport;
use crate::errors::AuditError;
use crate::notifier::Notifier;
use crate::spreadsheets::build_report_workbook;
use crate::templates::{alert_page, alert_subject};

const BREVO_SEND_URL: &str = "https://api.brevo.com/v3/smtp/email";

pub struct BrevoMailer {
    cfg: MailConfig,
    client: Client,
}

#[derive(Serialize)]
struct BrevoSender<'a> {
    name: &'a str,
    email: &'a str,
}

#[derive(Serialize)]
struct BrevoRecipient<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct BrevoAttachment {
    /// Base64 of the file bytes.
    content: String,
    name: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BrevoPayload<'a> {
    sender: BrevoSender<'a>,
    to: Vec<BrevoRecipient<'a>>,
    subject: String,
    html_content: String,
    attachment: Vec<BrevoAttachment>,
}

impl BrevoMailer {
    pub fn new(cfg: MailConfig) -> Self {
        Self {
            cfg,
            client: Client::new(),
        }
    }

    fn build_payload(&self, report: &AuditReport) -> Result<BrevoPayload<'_>, AuditError> {
        if self.cfg.recipients.is_empty() {
            return Err(AuditError::ConfigError(
                "no recipients configured (EMAIL_CX / EMAIL_OPS)".into(),
            ));
        }
        if self.cfg.sender_email.is_empty() {
            return Err(AuditError::ConfigError("EMAIL_SENDER is not set".into()));
        }

        let workbook = build_report_workbook(report)?;

        Ok(BrevoPayload {
            sender: BrevoSender {
                name: &self.cfg.sender_name,
                email: &self.cfg.sender_email,
            },
            to: self
                .cfg
                .recipients
                .iter()
                .map(|email| BrevoRecipient { email })
                .collect(),
            subject: alert_subject(report),
            html_content: alert_page(report).into_string(),
            attachment: vec![BrevoAttachment {
                content: base64::engine::general_purpose::STANDARD.encode(workbook),
                name: format!("offboarding_conflicts_{}.xlsx", report.generated_on),
            }],
        })
    }
}

impl Notifier for BrevoMailer {
    fn notify(&self, report: &AuditReport) -> Result<(), AuditError> {
        if self.cfg.api_key.is_empty() {
            return Err(AuditError::ConfigError("BREVO_API_KEY is not set".into()));
        }
        let payload = self.build_payload(report)?;

        let resp = self
            .client
            .post(BREVO_SEND_URL)
            .header("api-key", &self.cfg.api_key)
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .map_err(|e| AuditError::MailError(format!("Request failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let error_body = resp.text().unwrap_or_else(|_| "(no body)".to_string());
            return Err(AuditError::MailError(format!(
                "Brevo API error: {status} - {error_body}"
            )));
        }

        tracing::info!(recipients = ?self.cfg.recipients, "alert email sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conflict::{ConflictReason, ConflictRecord};
    use crate::domain::property::PropertyStatus;
    use crate::domain::reservation::ReservationStatus;
    use chrono::NaiveDate;

    fn mail_config(recipients: &[&str]) -> MailConfig {
        MailConfig {
            api_key: "test-key".to_string(),
            sender_email: "monitor@example.com".to_string(),
            sender_name: "Offboarding Monitor".to_string(),
            recipients: recipients.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn report() -> AuditReport {
        let d = NaiveDate::from_ymd_opt(2024, 1, 5);
        AuditReport::assemble(
            NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
            vec![ConflictRecord {
                property_name: "Casa Sol".to_string(),
                property_status: PropertyStatus::Inactive,
                confirmation_code: "HM-1".to_string(),
                reservation_status: ReservationStatus::Confirmed,
                check_in: d,
                check_out: d,
                reason: ConflictReason::PostCutoff,
                boundary_start: d,
                boundary_end: d,
            }],
            vec![],
        )
    }

    #[test]
    fn payload_matches_brevo_shape() {
        let mailer = BrevoMailer::new(mail_config(&["cx@example.com", "ops@example.com"]));
        let payload = mailer.build_payload(&report()).unwrap();
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["sender"]["email"], "monitor@example.com");
        assert_eq!(json["to"].as_array().unwrap().len(), 2);
        assert_eq!(json["to"][1]["email"], "ops@example.com");
        assert_eq!(json["subject"], "URGENT: 1 reservations on offboarding properties");
        assert!(json["htmlContent"].as_str().unwrap().contains("HM-1"));
        assert_eq!(
            json["attachment"][0]["name"],
            "offboarding_conflicts_2024-01-03.xlsx"
        );

        let bytes = base64::engine::general_purpose::STANDARD
            .decode(json["attachment"][0]["content"].as_str().unwrap())
            .unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn refuses_to_send_without_recipients() {
        let mailer = BrevoMailer::new(mail_config(&[]));
        let err = mailer.notify(&report()).unwrap_err();
        assert!(matches!(err, AuditError::ConfigError(_)));
    }

    #[test]
    fn refuses_to_send_without_api_key() {
        let mut cfg = mail_config(&["cx@example.com"]);
        cfg.api_key.clear();
        let err = BrevoMailer::new(cfg).notify(&report()).unwrap_err();
        assert!(matches!(err, AuditError::ConfigError(_)));
    }
}
