pub mod availability;
pub mod hours;
pub mod reservation;
pub mod salon;
pub mod time;
