pub mod alert;

pub use alert::{alert_page, alert_subject};
