use std::sync::Arc;

use crate::bootstrap::AxumContext;

/// Handler state: the ledger, session and settings services plus the SSE hub.
pub type AppState = Arc<AxumContext>;
