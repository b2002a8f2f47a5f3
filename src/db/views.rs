// db/views.rs

/// Every read the audit is allowed to make. SQL lives in `sql/` and is
/// compiled in; callers bind values, never splice them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Confirmed/reserved reservations joined to their listing.
    Reservations,
    /// Blocks of a given interval code joined to their listing.
    OffboardingBlocks,
    /// Master view rows carrying an offboarding cutoff.
    PropertyCutoffs,
    /// Active flag per listing, falling back to the raw payload.
    ListingActivity,
}

const SQL_RESERVATIONS: &str = include_str!("../../sql/reservations_with_listing.sql");
const SQL_OFFBOARDING_BLOCKS: &str = include_str!("../../sql/offboarding_blocks.sql");
const SQL_PROPERTY_CUTOFFS: &str = include_str!("../../sql/property_cutoffs.sql");
const SQL_LISTING_ACTIVITY: &str = include_str!("../../sql/listing_activity.sql");

impl View {
    pub const ALL: [View; 4] = [
        View::Reservations,
        View::OffboardingBlocks,
        View::PropertyCutoffs,
        View::ListingActivity,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            View::Reservations => "reservations",
            View::OffboardingBlocks => "offboarding_blocks",
            View::PropertyCutoffs => "property_cutoffs",
            View::ListingActivity => "listing_activity",
        }
    }

    pub fn sql(&self) -> &'static str {
        match self {
            View::Reservations => SQL_RESERVATIONS,
            View::OffboardingBlocks => SQL_OFFBOARDING_BLOCKS,
            View::PropertyCutoffs => SQL_PROPERTY_CUTOFFS,
            View::ListingActivity => SQL_LISTING_ACTIVITY,
        }
    }

    /// Tables the query reads from.
    pub fn relations(&self) -> &'static [&'static str] {
        match self {
            View::Reservations => &["guesty_reservation", "guesty_listing"],
            View::OffboardingBlocks => &["block_gold", "guesty_listing"],
            View::PropertyCutoffs => &["listing_master", "guesty_listing"],
            View::ListingActivity => &["guesty_listing"],
        }
    }
}
