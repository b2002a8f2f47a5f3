// src/config.rs
use std::path::PathBuf;

use crate::domain::conflict::ReportPolicy;
use crate::errors::AuditError;

#[derive(Debug, Clone, PartialEq)]
pub struct MailConfig {
    pub api_key: String,
    pub sender_email: String,
    pub sender_name: String,
    /// Deduplicated, in the order they were configured.
    pub recipients: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuditConfig {
    pub database_path: PathBuf,
    pub policy: ReportPolicy,
    pub mail: MailConfig,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("audit.sqlite3"),
            policy: ReportPolicy::Actionable,
            mail: MailConfig {
                api_key: String::new(),
                sender_email: String::new(),
                sender_name: "Offboarding Monitor".to_string(),
                recipients: Vec::new(),
            },
        }
    }
}

/// Splits comma-separated address lists, trims, drops empties and repeats.
pub fn merge_recipients<'a>(lists: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for list in lists {
        for email in list.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            if !out.iter().any(|seen| seen.eq_ignore_ascii_case(email)) {
                out.push(email.to_string());
            }
        }
    }
    out
}

impl AuditConfig {
    /// Reads the process environment. Call once, after `dotenvy::dotenv()`.
    pub fn from_env() -> Result<Self, AuditError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AuditError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_path = get("AUDIT_DATABASE_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.database_path);

        let lookback_days = match get("AUDIT_LOOKBACK_DAYS") {
            Some(raw) => Some(raw.trim().parse::<u32>().map_err(|_| {
                AuditError::ConfigError(format!("AUDIT_LOOKBACK_DAYS must be a whole number, got '{raw}'"))
            })?),
            None => None,
        };

        let policy = match get("AUDIT_MODE").as_deref().map(str::trim) {
            None | Some("actionable") if lookback_days.is_some() => {
                return Err(AuditError::ConfigError(
                    "AUDIT_LOOKBACK_DAYS only applies with AUDIT_MODE=historical".to_string(),
                ))
            }
            None | Some("actionable") => ReportPolicy::Actionable,
            Some("historical") => ReportPolicy::Historical { lookback_days },
            Some(other) => {
                return Err(AuditError::ConfigError(format!(
                    "AUDIT_MODE must be 'actionable' or 'historical', got '{other}'"
                )))
            }
        };

        let cx = get("EMAIL_CX").unwrap_or_default();
        let ops = get("EMAIL_OPS").unwrap_or_default();

        let mail = MailConfig {
            api_key: get("BREVO_API_KEY").unwrap_or_default(),
            sender_email: get("EMAIL_SENDER").unwrap_or_default(),
            sender_name: get("EMAIL_SENDER_NAME").unwrap_or(defaults.mail.sender_name),
            recipients: merge_recipients([cx.as_str(), ops.as_str()]),
        };

        Ok(Self {
            database_path,
            policy,
            mail,
        })
    }
}
