pub mod health_service;
pub mod page_service;
pub mod submission_service;
