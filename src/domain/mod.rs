/// Account records, statuses, reminder flags and thresholds
pub mod account;
/// Pure classification, extension, duplicate and pass-planning logic
pub mod lifecycle;
/// Per-chat session registry with explicit timeout
pub mod session;
/// The add-account state machine
pub mod wizard;
