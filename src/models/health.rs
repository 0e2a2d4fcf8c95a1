use std::net::{Ipv4Addr, UdpSocket};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Health {
    pub status: u16,
    pub status_message: String,
    pub timestamp: String,
    pub ip_address: String,
}

impl Health {
    pub fn ok(now: DateTime<Utc>) -> Self {
        Self {
            status: 200,
            status_message: "OK".to_string(),
            timestamp: utils::iso_timestamp(&now),
            ip_address: local_ip_address(),
        }
    }
}

/// Address of the interface this host routes outbound traffic through.
fn local_ip_address() -> String {
    // connect() on UDP only selects a route, nothing is sent
    UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))
        .and_then(|socket| {
            socket.connect((Ipv4Addr::new(8, 8, 8, 8), 80))?;
            socket.local_addr()
        })
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|_| Ipv4Addr::LOCALHOST.to_string())
}
