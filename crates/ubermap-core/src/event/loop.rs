// Ubermap Event Loop
// Single-threaded read → resync → translate → pump cycle

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::resync::{Disposition, ResyncHandler};
use super::InputRecord;
use crate::error::{MapperError, MapperResult};
use crate::output::EventSink;
use crate::transform::{Clock, Translator};

/// Source of raw input records.
pub trait EventSource {
    /// Wait for input for at most `timeout_ms` (forever when `None`) and
    /// return every pending record in arrival order.
    ///
    /// A timeout or an interrupted wait returns an empty batch.
    fn read_events(&mut self, timeout_ms: Option<u64>) -> MapperResult<Vec<InputRecord>>;
}

/// Convert an optional millisecond timeout to the poll(2) convention.
pub fn poll_timeout(timeout_ms: Option<u64>) -> i32 {
    match timeout_ms {
        Some(ms) => i32::try_from(ms).unwrap_or(i32::MAX),
        None => -1,
    }
}

/// Drives one translator against one device.
///
/// The loop blocks only inside `EventSource::read_events`. While pointer
/// motion is in progress it passes the pump deadline as the read timeout so
/// motion frames keep flowing without input.
pub struct EventLoop {
    translator: Translator,
    resync: ResyncHandler,
    shutdown: Arc<AtomicBool>,
}

impl EventLoop {
    pub fn new(translator: Translator) -> Self {
        Self::with_shutdown_flag(translator, Arc::new(AtomicBool::new(false)))
    }

    /// Use an externally owned stop flag (e.g. one registered with
    /// signal-hook).
    pub fn with_shutdown_flag(translator: Translator, shutdown: Arc<AtomicBool>) -> Self {
        Self {
            translator,
            resync: ResyncHandler::new(),
            shutdown,
        }
    }

    pub fn shutdown_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.shutdown)
    }

    pub fn is_stopping(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }

    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    pub fn resync(&self) -> &ResyncHandler {
        &self.resync
    }

    /// Run until the stop flag is raised or a fatal error occurs.
    ///
    /// Fatal errors are returned; the caller owns the device and is
    /// responsible for releasing it.
    pub fn run<D>(&mut self, device: &mut D, clock: &dyn Clock) -> MapperResult<()>
    where
        D: EventSource + EventSink,
    {
        log::info!("Event loop started");
        while !self.is_stopping() {
            self.step(device, clock)?;
        }
        log::info!("Stop requested, leaving event loop");
        Ok(())
    }

    /// One iteration: read a batch, translate it, then give the pump a
    /// chance to emit.
    pub fn step<D>(&mut self, device: &mut D, clock: &dyn Clock) -> MapperResult<()>
    where
        D: EventSource + EventSink,
    {
        let timeout = self.translator.pump_timeout_ms(clock);
        let batch = match device.read_events(timeout) {
            Ok(batch) => batch,
            Err(MapperError::TryAgain) => {
                log::trace!("read would block, retrying");
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        for event in &batch {
            if self.resync.filter(event) == Disposition::Discard {
                continue;
            }
            match self.translator.translate(event, clock, device) {
                Ok(()) => {}
                Err(MapperError::Integrity(msg)) => {
                    log::warn!("Skipping malformed event {}: {}", event, msg);
                }
                Err(e) => return Err(e),
            }
        }

        self.translator.pump(clock, device)?;
        Ok(())
    }
}
