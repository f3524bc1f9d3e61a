//! Correlation identifiers linking an external record to its internal one.
//!
//! Format: base-36 millisecond timestamp, a zero-padded base-36 counter and a
//! short random base-36 suffix. The counter makes ids from one generator
//! distinct; the suffix makes collisions between generators unlikely.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const COUNTER_WIDTH: usize = 4;
const SUFFIX_LEN: usize = 4;

/// Opaque correlation identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrelationId(String);

impl CorrelationId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CorrelationId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<CorrelationId> for String {
    fn from(id: CorrelationId) -> Self {
        id.0
    }
}

/// Issues correlation ids. One per sanitizer instance.
#[derive(Debug, Default)]
pub struct CorrelationIdGenerator {
    counter: AtomicU64,
}

impl CorrelationIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> CorrelationId {
        let sequence = self.counter.fetch_add(1, Ordering::Relaxed);
        let millis = chrono::Utc::now().timestamp_millis().max(0) as u64;

        let mut id = to_base36(millis);
        let counter = to_base36(sequence);
        for _ in counter.len()..COUNTER_WIDTH {
            id.push('0');
        }
        id.push_str(&counter);

        let mut rng = rand::rng();
        for _ in 0..SUFFIX_LEN {
            id.push(BASE36[rng.random_range(0..BASE36.len())] as char);
        }

        CorrelationId(id)
    }

    /// Number of ids issued so far.
    pub fn issued(&self) -> u64 {
        self.counter.load(Ordering::Relaxed)
    }
}

fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(BASE36[(n % 36) as usize]);
        n /= 36;
    }
    digits.reverse();
    String::from_utf8_lossy(&digits).into_owned()
}
