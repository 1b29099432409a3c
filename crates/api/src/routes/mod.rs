pub mod availability;
pub mod health;
pub mod hours;
pub mod reservation;
