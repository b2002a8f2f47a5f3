pub mod blocks;
pub mod connection;
pub mod properties;
pub mod reservations;
pub mod schema;
pub mod views;

pub use blocks::fetch_offboarding_blocks;
pub use connection::{check_connection, Database};
pub use properties::{fetch_listing_activity, fetch_property_cutoffs};
pub use reservations::fetch_active_reservations;
pub use schema::inspect_views;
pub use views::View;
