//! Identifier and clock issuance for new and mutated entities.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

pub trait Issuer: Send + Sync {
    fn next_id(&self) -> Uuid;
    fn now(&self) -> DateTime<Utc>;
}

/// Random v4 identifiers and the system UTC clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemIssuer;

impl Issuer for SystemIssuer {
    fn next_id(&self) -> Uuid {
        Uuid::new_v4()
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Deterministic issuer: identifiers count up from 1 and every `now()` call
/// moves the clock forward by `step`.
#[derive(Debug)]
pub struct SteppingIssuer {
    start: DateTime<Utc>,
    step: Duration,
    ids: AtomicU64,
    ticks: AtomicU64,
}

impl SteppingIssuer {
    pub fn new(start: DateTime<Utc>, step: Duration) -> Self {
        Self {
            start,
            step,
            ids: AtomicU64::new(0),
            ticks: AtomicU64::new(0),
        }
    }

    pub fn starting_at(start: DateTime<Utc>) -> Self {
        Self::new(start, Duration::seconds(1))
    }
}

impl Issuer for SteppingIssuer {
    fn next_id(&self) -> Uuid {
        let n = self.ids.fetch_add(1, Ordering::SeqCst) + 1;

        let mut bytes = [0u8; 16];
        bytes[8..].copy_from_slice(&n.to_be_bytes());
        uuid::Builder::from_random_bytes(bytes).into_uuid()
    }

    fn now(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        self.start + self.step * tick as i32
    }
}
