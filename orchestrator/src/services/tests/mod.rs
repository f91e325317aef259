//! Service-specific tests
//!
//! Each service has its own test file; shared helpers live in `common`.


pub mod common {
    use crate::endpoints::Endpoint;
    use std::net::SocketAddr;

    /// Endpoint pointing at a local mock server
    pub fn local_endpoint(name: &str, address: &SocketAddr, path: &str) -> Endpoint {
        Endpoint::new(name, &address.ip().to_string(), address.port(), path)
    }
}
