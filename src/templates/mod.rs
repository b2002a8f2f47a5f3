pub mod components;
pub mod layouts;
pub mod pages;

// Re-exports for convenience
pub use pages::{alert_page, alert_subject};
