// Ubermap Output Sink
// Destination for translated frames

use crate::error::MapperResult;
use crate::event::InputRecord;

/// Receives complete output frames.
///
/// A frame is every record produced for one logical output step, already
/// terminated with SYN_REPORT by the translator. Implementations write it
/// contiguously and must not add their own terminator.
pub trait EventSink {
    fn emit_frame(&mut self, frame: &[InputRecord]) -> MapperResult<()>;
}

/// In-memory sink that records frames, for tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    frames: Vec<Vec<InputRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> &[Vec<InputRecord>] {
        &self.frames
    }

    /// All records in emission order
    pub fn events(&self) -> Vec<InputRecord> {
        self.frames.iter().flatten().copied().collect()
    }

    /// Records as (kind, code, value), ignoring timestamps
    pub fn payloads(&self) -> Vec<(u16, u16, i32)> {
        self.frames.iter().flatten().map(|e| e.payload()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }

    /// Drain the recorded frames
    pub fn take(&mut self) -> Vec<Vec<InputRecord>> {
        std::mem::take(&mut self.frames)
    }
}

impl EventSink for MemorySink {
    fn emit_frame(&mut self, frame: &[InputRecord]) -> MapperResult<()> {
        self.frames.push(frame.to_vec());
        Ok(())
    }
}
