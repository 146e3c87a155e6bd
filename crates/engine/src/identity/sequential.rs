//! Sequential GUID generation
//!
//! GUIDs are UUIDv7 values (millisecond timestamp in the high bits). When the
//! clock would not produce a value strictly greater than the last one handed
//! out, the random bits of the last value are incremented instead (carrying
//! into the timestamp), so the sequence is strictly increasing within a
//! process and every value stays a well-formed UUIDv7. Canonical hyphenated text of a UUID sorts
//! like its 128-bit value, so keys built from these GUIDs sort in creation
//! order.

use parking_lot::Mutex;
use uuid::Uuid;

const RAND_B_BITS: u32 = 62;
const RAND_B_MASK: u128 = (1 << RAND_B_BITS) - 1;
const RAND_A_MASK: u128 = 0xFFF;
const TIMESTAMP_MASK: u128 = (1 << 48) - 1;
const VERSION_7: u128 = 0x7 << 76;
const VARIANT_RFC4122: u128 = 0b10 << 62;

static PROCESS_SEQUENCE: SequentialGuid = SequentialGuid::new();

/// Strictly increasing GUID source
#[derive(Debug)]
pub struct SequentialGuid {
    last: Mutex<u128>,
}

impl SequentialGuid {
    /// Create a generator with no history
    pub const fn new() -> Self {
        Self {
            last: Mutex::new(0),
        }
    }

    /// Next GUID, strictly greater than every earlier one from this generator
    pub fn next(&self) -> Uuid {
        let mut last = self.last.lock();
        let candidate = Uuid::now_v7().as_u128();
        let value = if candidate > *last {
            candidate
        } else {
            successor(*last)
        };
        *last = value;
        Uuid::from_u128(value)
    }
}

impl Default for SequentialGuid {
    fn default() -> Self {
        Self::new()
    }
}

/// Smallest UUIDv7 greater than `value`
///
/// Counts through `rand_b`, then `rand_a`, then the timestamp, leaving the
/// version and variant bits in place.
fn successor(value: u128) -> u128 {
    let mut timestamp = value >> 80;
    let mut rand_a = (value >> 64) & RAND_A_MASK;
    let mut rand_b = (value & RAND_B_MASK) + 1;

    if rand_b > RAND_B_MASK {
        rand_b = 0;
        rand_a += 1;
        if rand_a > RAND_A_MASK {
            rand_a = 0;
            timestamp = (timestamp + 1) & TIMESTAMP_MASK;
        }
    }

    (timestamp << 80) | VERSION_7 | (rand_a << 64) | VARIANT_RFC4122 | rand_b
}

/// Next GUID from the process-wide sequence
pub fn next_sequential_guid() -> Uuid {
    PROCESS_SEQUENCE.next()
}
