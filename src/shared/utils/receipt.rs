/// Receipt id generator
///
/// Every gateway order carries a unique, time-based receipt identifier.
/// An atomic counter suffix keeps ids distinct when two orders are created
/// within the same millisecond.
use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};

static RECEIPT_COUNTER: AtomicU64 = AtomicU64::new(1);

pub struct ReceiptIdGenerator;

impl ReceiptIdGenerator {
    /// Generate the next receipt id, e.g. "rcpt_1756368000000_42"
    pub fn next() -> String {
        let seq = RECEIPT_COUNTER.fetch_add(1, Ordering::SeqCst);
        format!("rcpt_{}_{}", Utc::now().timestamp_millis(), seq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn receipt_ids_are_unique() {
        let ids: HashSet<String> = (0..1000).map(|_| ReceiptIdGenerator::next()).collect();
        assert_eq!(ids.len(), 1000);
    }
}
