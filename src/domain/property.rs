// src/domain/property.rs

use chrono::NaiveDate;

/// Listing activity as exposed by the channel manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyStatus {
    Active,
    Inactive,
    Unknown,
}

impl PropertyStatus {
    pub fn from_flag(flag: Option<bool>) -> Self {
        match flag {
            Some(true) => PropertyStatus::Active,
            Some(false) => PropertyStatus::Inactive,
            None => PropertyStatus::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyStatus::Active => "active",
            PropertyStatus::Inactive => "inactive",
            PropertyStatus::Unknown => "unknown",
        }
    }
}

/// A property that the master view flags with an offboarding cutoff.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyCutoff {
    pub property_name: String,
    pub status: PropertyStatus,
    pub country: Option<String>,
    pub city: Option<String>,
    pub cutoff: NaiveDate,
}
