pub mod availability_service;
pub mod booking_service;
pub mod pricing_service;
pub mod search_scoring;
pub mod search_service;
pub mod season_service;
