/// Timestamp parsing and formatting for sheet cells
pub mod datetime;
/// Prefixed tracing helpers
pub mod logging;
/// Operator input validation and phone masking
pub mod validation;
