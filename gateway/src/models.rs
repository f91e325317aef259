//! Request bodies accepted by the gateway routes

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use orchestrator::Caller;
use shared::{PerformanceFlag, PerformanceObject, PerformanceResponse, Ticket, User, UNKNOWN_SESSION};

/// Session id for a request: the peer's IPv4 address when the connection is
/// known, else whatever the body declared, else the broadcast address
pub fn resolve_session(peer: Option<SocketAddr>, declared: Option<Ipv4Addr>) -> Ipv4Addr {
    match peer.map(|address| address.ip()) {
        Some(IpAddr::V4(ip)) => ip,
        Some(IpAddr::V6(ip)) => ip.to_ipv4_mapped().unwrap_or(UNKNOWN_SESSION),
        None => declared.unwrap_or(UNKNOWN_SESSION),
    }
}

/// Fields every request may carry about its sender
pub trait Identified {
    fn sess_id(&self) -> Option<Ipv4Addr>;
    fn user_object(&self) -> Option<&User>;

    fn caller(&self, peer: Option<SocketAddr>) -> Caller {
        Caller {
            sess_id: resolve_session(peer, self.sess_id()),
            user: self.user_object().cloned(),
        }
    }
}

/// Body of `POST /generate`
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PerformanceRequest {
    #[serde(default)]
    pub sess_id: Option<Ipv4Addr>,
    #[serde(default)]
    pub user_object: Option<User>,
    #[serde(default)]
    pub performance_object: PerformanceObject,
}

/// Body of `POST /amend/{index}`: a performance served earlier, verbatim
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AmendmentRequest {
    #[serde(default)]
    pub sess_id: Option<Ipv4Addr>,
    #[serde(default)]
    pub user_object: Option<User>,
    pub performance_object: PerformanceResponse,
}

/// Body of `POST /label`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LabelingRequest {
    #[serde(default)]
    pub sess_id: Option<Ipv4Addr>,
    #[serde(default)]
    pub user_object: Option<User>,
    pub ticket: Ticket,
    pub flag: PerformanceFlag,
}

macro_rules! impl_identified {
    ($($request:ty),+) => {
        $(
            impl Identified for $request {
                fn sess_id(&self) -> Option<Ipv4Addr> {
                    self.sess_id
                }

                fn user_object(&self) -> Option<&User> {
                    self.user_object.as_ref()
                }
            }
        )+
    };
}

impl_identified!(PerformanceRequest, AmendmentRequest, LabelingRequest);
