pub mod block;
pub mod conflict;
pub mod dates;
pub mod property;
pub mod report;
pub mod reservation;
