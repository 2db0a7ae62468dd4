use std::sync::Arc;

use service::Services;

/// Shared handler state: the resource services.
#[derive(Clone)]
pub struct ServerState {
    pub services: Arc<Services>,
}

impl ServerState {
    pub fn new(services: Services) -> Self { Self { services: Arc::new(services) } }
}
