/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - session: SessionService (verifier + identity resolver)
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::services::auth::SessionService;

#[derive(Clone, Debug)]
pub struct AppState {
    pub session: Arc<SessionService>,
}

impl AppState {
    pub fn new(session: Arc<SessionService>) -> Self {
        Self { session }
    }
}
