/// Health check HTTP endpoints
pub mod health;
/// The hourly reminder scheduler
pub mod reminder;
