//! HTTP server configuration object.

use std::net::SocketAddr;

use feedback_board::inbound::http::session_config::SessionSettings;
use feedback_board::outbound::persistence::DbPool;

/// Everything `create_server` needs, resolved before the listener binds.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
}

impl ServerConfig {
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr, db_pool: DbPool) -> Self {
        Self {
            session,
            bind_addr,
            db_pool,
        }
    }
}
