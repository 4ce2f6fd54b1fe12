pub mod chart_service;
pub mod feed;
