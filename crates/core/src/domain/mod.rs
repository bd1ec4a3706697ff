pub mod alternative;
pub mod record;
pub mod signal;
