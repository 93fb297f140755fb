pub mod dataset_service;
pub mod valuation_service;
pub mod chart_service;
