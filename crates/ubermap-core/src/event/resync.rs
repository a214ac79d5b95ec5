// Ubermap Resync Handler
// Drains the stale stream after the kernel reports SYN_DROPPED

use super::InputRecord;

/// What the loop should do with a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Hand the record to the translator
    Deliver,
    /// Part of a dropped frame; throw it away
    Discard,
}

/// Filter that sits between the device and the translator.
///
/// On SYN_DROPPED every record up to and including the next SYN_REPORT is
/// discarded. Layer flags in the translator are corrected by the next real
/// press or release, so nothing else needs replaying.
#[derive(Debug, Clone, Default)]
pub struct ResyncHandler {
    draining: bool,
    discarded: usize,
    drops: u64,
}

impl ResyncHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_draining(&self) -> bool {
        self.draining
    }

    /// Number of SYN_DROPPED signals seen so far
    pub fn drop_count(&self) -> u64 {
        self.drops
    }

    pub fn filter(&mut self, event: &InputRecord) -> Disposition {
        if event.is_syn_dropped() {
            if self.draining {
                self.discarded += 1;
            } else {
                log::warn!("Kernel dropped input events, resynchronizing");
                self.draining = true;
                self.discarded = 1;
            }
            self.drops += 1;
            return Disposition::Discard;
        }

        if !self.draining {
            return Disposition::Deliver;
        }

        self.discarded += 1;
        if event.is_syn_report() {
            log::info!(
                "Resynchronized after discarding {} record(s)",
                self.discarded
            );
            self.draining = false;
            self.discarded = 0;
        }
        Disposition::Discard
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_stream_is_delivered() {
        let mut resync = ResyncHandler::new();
        assert_eq!(resync.filter(&InputRecord::key(30, 1)), Disposition::Deliver);
        assert_eq!(resync.filter(&InputRecord::syn_report()), Disposition::Deliver);
        assert!(!resync.is_draining());
    }

    #[test]
    fn test_drain_through_next_report() {
        let mut resync = ResyncHandler::new();
        assert_eq!(resync.filter(&InputRecord::syn_dropped()), Disposition::Discard);
        assert!(resync.is_draining());
        assert_eq!(resync.filter(&InputRecord::key(30, 0)), Disposition::Discard);
        assert_eq!(resync.filter(&InputRecord::syn_report()), Disposition::Discard);
        assert!(!resync.is_draining());
        assert_eq!(resync.filter(&InputRecord::key(31, 1)), Disposition::Deliver);
        assert_eq!(resync.drop_count(), 1);
    }

    #[test]
    fn test_repeated_drop_extends_drain() {
        let mut resync = ResyncHandler::new();
        resync.filter(&InputRecord::syn_dropped());
        resync.filter(&InputRecord::key(30, 1));
        resync.filter(&InputRecord::syn_dropped());
        assert!(resync.is_draining());
        resync.filter(&InputRecord::syn_report());
        assert!(!resync.is_draining());
        assert_eq!(resync.drop_count(), 2);
    }
}
