/// Operator command implementations
pub mod commands;
/// Dispatch schema and update handlers
pub mod handlers;
/// Reply and inline keyboards
pub mod keyboards;

use std::sync::Arc;

use crate::domain::session::Sessions;
use crate::owner::OwnerRegistry;
use crate::store::AccountStore;

/// Everything the handlers need, shared behind one `Arc`.
pub struct AppContext {
    pub store: Arc<dyn AccountStore>,
    pub owner: Arc<dyn OwnerRegistry>,
    pub sessions: Arc<Sessions>,
    pub monthly_min_days: u32,
}
