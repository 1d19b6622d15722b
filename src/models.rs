pub mod cabana;
pub mod pricing;
pub mod reservation;
pub mod search;
