//! Telemetry facts sent to the accounting service
//!
//! Facts are write-once. The gateway never reads them back.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;

use crate::errors::SharedError;

/// Session id used when the client address cannot be determined
pub const UNKNOWN_SESSION: Ipv4Addr = Ipv4Addr::BROADCAST;

/// Identity of a registered user
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    pub name_given: String,
    pub name_family: String,
}

/// What happened to a performance on the client side
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceFlag {
    Served,
    Amended,
    Saved,
    Downloaded,
}

/// Performance ticket: a decimal integer with an optional leading sign
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ticket(String);

impl Ticket {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Ticket {
    type Error = SharedError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let digits = value.strip_prefix(['+', '-']).unwrap_or(&value);
        let valid = !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit());
        if valid {
            Ok(Self(value))
        } else {
            Err(SharedError::InvalidTicket { ticket: value })
        }
    }
}

impl TryFrom<&str> for Ticket {
    type Error = SharedError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Ticket::try_from(value.to_string())
    }
}

impl From<Ticket> for String {
    fn from(ticket: Ticket) -> String {
        ticket.0
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    pub sess_id: Ipv4Addr,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserData {
    pub sess_id: Ipv4Addr,
    pub user_object: User,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelData {
    pub sess_id: Ipv4Addr,
    pub perf_id: Ticket,
    pub flag: PerformanceFlag,
    pub user_email: Option<String>,
}

/// Closed set of telemetry facts; each serializes as its bare payload
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TelemetryFact {
    Session(SessionData),
    User(UserData),
    Label(LabelData),
}

impl TelemetryFact {
    /// Session fact for anonymous callers, user fact otherwise
    pub fn for_caller(sess_id: Ipv4Addr, user: Option<&User>) -> Self {
        match user {
            Some(user) => TelemetryFact::User(UserData {
                sess_id,
                user_object: user.clone(),
            }),
            None => TelemetryFact::Session(SessionData { sess_id }),
        }
    }

    pub fn label(
        sess_id: Ipv4Addr,
        ticket: Ticket,
        flag: PerformanceFlag,
        user: Option<&User>,
    ) -> Self {
        TelemetryFact::Label(LabelData {
            sess_id,
            perf_id: ticket,
            flag,
            user_email: user.map(|user| user.email.clone()),
        })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            TelemetryFact::Session(_) => "session",
            TelemetryFact::User(_) => "user",
            TelemetryFact::Label(_) => "label",
        }
    }
}
