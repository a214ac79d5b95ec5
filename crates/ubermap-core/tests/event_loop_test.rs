// Ubermap Event Loop Tests
//
// Runs the real loop against a scripted device and a manual clock: pump
// deadlines, resync draining, error recovery and the stop flag.
//
// Run with: cargo test --test event_loop_test

use std::collections::VecDeque;
use std::io;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use ubermap_core::event::{EventLoop, EventSource};
use ubermap_core::input::event::{EV_KEY, EV_REL, EV_SYN, REL_X};
use ubermap_core::mapping::{Direction, MappingTable, MouseAction, MouseTable};
use ubermap_core::output::{EventSink, MemorySink};
use ubermap_core::transform::{ManualClock, Translator};
use ubermap_core::{InputRecord, Key, MapperError, MapperResult};

enum Step {
    /// Records the kernel has queued
    Batch(Vec<InputRecord>),
    /// Nothing arrives; the read sleeps for its full timeout
    Idle,
    Fail(MapperError),
}

/// Device double: replays a script, records frames and requested timeouts.
/// Raises the stop flag once the script runs out.
struct ScriptedDevice {
    script: VecDeque<Step>,
    clock: Rc<ManualClock>,
    shutdown: Arc<AtomicBool>,
    timeouts: Vec<Option<u64>>,
    sink: MemorySink,
}

impl ScriptedDevice {
    fn new(script: Vec<Step>, clock: Rc<ManualClock>, shutdown: Arc<AtomicBool>) -> Self {
        Self {
            script: script.into(),
            clock,
            shutdown,
            timeouts: Vec::new(),
            sink: MemorySink::new(),
        }
    }
}

impl EventSource for ScriptedDevice {
    fn read_events(&mut self, timeout_ms: Option<u64>) -> MapperResult<Vec<InputRecord>> {
        self.timeouts.push(timeout_ms);
        match self.script.pop_front() {
            Some(Step::Batch(events)) => Ok(events),
            Some(Step::Idle) => {
                let wait = timeout_ms.expect("idle read with no timeout would block forever");
                self.clock.advance(wait);
                Ok(Vec::new())
            }
            Some(Step::Fail(err)) => Err(err),
            None => {
                self.shutdown.store(true, Ordering::SeqCst);
                Ok(Vec::new())
            }
        }
    }
}

impl EventSink for ScriptedDevice {
    fn emit_frame(&mut self, frame: &[InputRecord]) -> MapperResult<()> {
        self.sink.emit_frame(frame)
    }
}

fn key(k: Key, value: i32) -> InputRecord {
    InputRecord::key(k.code(), value)
}

fn policy() -> MappingTable {
    MappingTable {
        mouse_key: Some(Key::LEFTMETA),
        mouse: MouseTable::from_pairs(&[(Key::L, MouseAction::Move(Direction::Right))]),
        ..MappingTable::identity()
    }
}

fn run_script(script: Vec<Step>) -> (MapperResult<()>, ScriptedDevice) {
    let clock = Rc::new(ManualClock::new(0));
    let mut event_loop = EventLoop::new(Translator::new(policy()).unwrap());
    let mut device = ScriptedDevice::new(script, Rc::clone(&clock), event_loop.shutdown_flag());
    let result = event_loop.run(&mut device, &*clock);
    (result, device)
}

#[test]
fn translates_batches_until_stopped() {
    let (result, device) = run_script(vec![Step::Batch(vec![
        key(Key::A, 1),
        InputRecord::syn_report(),
        key(Key::A, 0),
        InputRecord::syn_report(),
    ])]);

    assert!(result.is_ok());
    assert_eq!(
        device.sink.payloads(),
        vec![
            (EV_KEY, Key::A.code(), 1),
            (EV_SYN, 0, 0),
            (EV_KEY, Key::A.code(), 0),
            (EV_SYN, 0, 0),
        ]
    );
}

#[test]
fn pump_deadline_drives_read_timeout() {
    let (result, device) = run_script(vec![
        Step::Batch(vec![key(Key::LEFTMETA, 1), key(Key::L, 1)]),
        Step::Idle,
        Step::Idle,
        Step::Batch(vec![key(Key::L, 0)]),
    ]);

    assert!(result.is_ok());
    assert_eq!(
        device.timeouts,
        vec![None, Some(10), Some(10), Some(10), None]
    );
    assert_eq!(
        device.sink.payloads(),
        vec![(EV_REL, REL_X, 2), (EV_SYN, 0, 0), (EV_REL, REL_X, 2), (EV_SYN, 0, 0)]
    );
}

#[test]
fn dropped_events_are_drained() {
    let (result, device) = run_script(vec![Step::Batch(vec![
        key(Key::A, 1),
        InputRecord::syn_report(),
        InputRecord::syn_dropped(),
        key(Key::B, 1),
        InputRecord::syn_report(),
        key(Key::C, 1),
        InputRecord::syn_report(),
    ])]);

    assert!(result.is_ok());
    let keys: Vec<u16> = device
        .sink
        .events()
        .iter()
        .filter(|e| e.kind == EV_KEY)
        .map(|e| e.code)
        .collect();
    assert_eq!(keys, vec![Key::A.code(), Key::C.code()]);
}

#[test]
fn malformed_events_are_skipped() {
    let (result, device) = run_script(vec![Step::Batch(vec![
        InputRecord::key(0x300, 1),
        key(Key::A, 9),
        key(Key::B, 1),
    ])]);

    assert!(result.is_ok());
    assert_eq!(
        device.sink.payloads(),
        vec![(EV_KEY, Key::B.code(), 1), (EV_SYN, 0, 0)]
    );
}

#[test]
fn try_again_is_retried() {
    let (result, device) = run_script(vec![
        Step::Fail(MapperError::TryAgain),
        Step::Batch(vec![key(Key::Q, 1)]),
    ]);

    assert!(result.is_ok());
    assert_eq!(device.sink.frames().len(), 1);
}

#[test]
fn io_errors_end_the_loop() {
    let (result, device) = run_script(vec![
        Step::Fail(MapperError::Io(io::Error::new(io::ErrorKind::Other, "ENODEV"))),
        Step::Batch(vec![key(Key::Q, 1)]),
    ]);

    assert!(matches!(result, Err(MapperError::Io(_))));
    assert!(device.sink.is_empty());
    assert_eq!(device.timeouts.len(), 1);
}

#[test]
fn raised_stop_flag_skips_reading() {
    let clock = Rc::new(ManualClock::new(0));
    let shutdown = Arc::new(AtomicBool::new(true));
    let mut event_loop =
        EventLoop::with_shutdown_flag(Translator::new(policy()).unwrap(), Arc::clone(&shutdown));
    let mut device = ScriptedDevice::new(
        vec![Step::Batch(vec![key(Key::A, 1)])],
        Rc::clone(&clock),
        shutdown,
    );

    assert!(event_loop.run(&mut device, &*clock).is_ok());
    assert!(device.timeouts.is_empty());
    assert!(device.sink.is_empty());
}

#[test]
fn resync_state_is_visible() {
    let clock = ManualClock::new(0);
    let mut event_loop = EventLoop::new(Translator::new(policy()).unwrap());
    let mut device = ScriptedDevice::new(
        vec![Step::Batch(vec![InputRecord::syn_dropped(), key(Key::A, 1)])],
        Rc::new(ManualClock::new(0)),
        event_loop.shutdown_flag(),
    );

    event_loop.step(&mut device, &clock).unwrap();
    assert!(event_loop.resync().is_draining());
    assert_eq!(event_loop.resync().drop_count(), 1);
    assert!(device.sink.is_empty());
}
