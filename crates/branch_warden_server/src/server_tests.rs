use super::*;
use crate::test_support::test_state;

#[test]
fn test_default_config() {
    let config = ServerConfig::default();

    assert_eq!(config.host, DEFAULT_HOST);
    assert_eq!(config.port, DEFAULT_PORT);
}

#[test]
fn test_router_creation() {
    let server = WebhookServer::new(ServerConfig::default(), test_state());

    let _router = server.router();
}
