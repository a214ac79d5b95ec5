// Ubermap Translator
// Turns one input record into zero or more output frames
//
// Decision order for an EV_KEY record:
// - modifier-layer key: track it, emit nothing
// - mouse-layer key: track it, emit nothing
// - mouse layer held: buttons, wheel ticks, pointer directions
// - modifier layer held: substitute or swallow
// - otherwise: direct map or passthrough
//
// Every emitted frame ends with exactly one SYN_REPORT.

use smallvec::SmallVec;

use super::clock::Clock;
use super::pump::{step_size, PointerPump};
use super::state::LayerState;
use crate::error::{MapperError, MapperResult};
use crate::event::InputRecord;
use crate::input::event::{event_type_name, is_key_event, is_transparent_event, REL_WHEEL, REL_X, REL_Y};
use crate::mapping::{MappingTable, MouseAction};
use crate::output::EventSink;
use crate::{Action, Key};

/// Records of one output frame, terminator included
type Frame = SmallVec<[InputRecord; 4]>;

/// The event-translation state machine.
#[derive(Debug, Clone)]
pub struct Translator {
    policy: MappingTable,
    state: LayerState,
    pump: PointerPump,
    debug: bool,
}

impl Translator {
    /// Create a translator for a validated policy.
    ///
    /// Fails with `Argument` when the policy is inconsistent (e.g. both
    /// layers on the same key).
    pub fn new(policy: MappingTable) -> MapperResult<Self> {
        policy.validate()?;
        Ok(Self {
            policy,
            state: LayerState::new(),
            pump: PointerPump::new(),
            debug: false,
        })
    }

    /// Trace every input record and every emitted frame.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn policy(&self) -> &MappingTable {
        &self.policy
    }

    pub fn state(&self) -> &LayerState {
        &self.state
    }

    /// Translate one input record.
    ///
    /// SYN and MSC records are consumed: the translator writes its own
    /// SYN_REPORT after every frame it emits. Other event types are not
    /// expected from a keyboard; in debug mode they are reported as
    /// `Integrity` errors, otherwise dropped.
    pub fn translate(
        &mut self,
        event: &InputRecord,
        clock: &dyn Clock,
        sink: &mut dyn EventSink,
    ) -> MapperResult<()> {
        if self.debug {
            log::debug!("in  {}", event);
        }

        if !is_key_event(event.kind) {
            if is_transparent_event(event.kind) || !self.debug {
                return Ok(());
            }
            return Err(MapperError::Integrity(format!(
                "unexpected {} event (type {}) from a keyboard",
                event_type_name(event.kind),
                event.kind
            )));
        }

        let key = Key(event.code);
        if key.index().is_none() {
            return Err(MapperError::Integrity(format!(
                "key code {} is beyond KEY_MAX",
                event.code
            )));
        }
        let action = Action::from_value(event.value).ok_or_else(|| {
            MapperError::Integrity(format!("key {} has value {}", key, event.value))
        })?;

        if Some(key) == self.policy.mod_key {
            self.state.set_modifier(action.is_pressed());
            self.sync_pump();
            return Ok(());
        }
        if Some(key) == self.policy.mouse_key {
            self.state.set_mouse(action.is_pressed());
            self.sync_pump();
            return Ok(());
        }

        if self.state.mouse_pressed() {
            return self.translate_mouse(key, action, clock, sink);
        }

        if self.state.mod_pressed() {
            return match self.policy.modifier.get(key) {
                Some(out) => self.emit(sink, &[InputRecord::key(out.code(), action.value())]),
                None => Ok(()),
            };
        }

        let out = self.policy.direct.get(key).unwrap_or(key);
        self.emit(sink, &[InputRecord::key(out.code(), action.value())])
    }

    fn translate_mouse(
        &mut self,
        key: Key,
        action: Action,
        clock: &dyn Clock,
        sink: &mut dyn EventSink,
    ) -> MapperResult<()> {
        match self.policy.mouse.get(key) {
            MouseAction::Button(button) => {
                self.emit(sink, &[InputRecord::key(button.code(), action.value())])
            }
            MouseAction::WheelUp if action.is_pressed() => {
                self.emit(sink, &[InputRecord::rel(REL_WHEEL, 1)])
            }
            MouseAction::WheelDown if action.is_pressed() => {
                self.emit(sink, &[InputRecord::rel(REL_WHEEL, -1)])
            }
            MouseAction::WheelUp | MouseAction::WheelDown => Ok(()),
            MouseAction::Move(dir) => {
                self.state
                    .set_direction(dir, action.is_pressed(), clock.now_ms());
                self.sync_pump();
                Ok(())
            }
            // Unmapped keys are swallowed so typing does not leak through the layer.
            MouseAction::None => Ok(()),
        }
    }

    // Keep the pump schedule in step with the motion state.
    fn sync_pump(&mut self) {
        match self.state.motion_start_ms() {
            Some(start) if !self.pump.is_running() => self.pump.start(start),
            Some(_) => {}
            None => self.pump.stop(),
        }
    }

    /// How long the event loop may block before the next pointer frame is
    /// due. `None` when no pointer motion is in progress.
    pub fn pump_timeout_ms(&self, clock: &dyn Clock) -> Option<u64> {
        self.pump.timeout_ms(clock.now_ms())
    }

    /// Emit one pointer-motion frame if a tick is due.
    ///
    /// Returns whether a frame was written.
    pub fn pump(&mut self, clock: &dyn Clock, sink: &mut dyn EventSink) -> MapperResult<bool> {
        let Some(start) = self.state.motion_start_ms() else {
            return Ok(false);
        };
        let now = clock.now_ms();
        if !self.pump.is_due(now) {
            return Ok(false);
        }
        self.pump.advance(now);

        let step = step_size(&self.policy.speed, now.saturating_sub(start));
        let (dx, dy) = self.state.motion_vector();
        let mut events: SmallVec<[InputRecord; 2]> = SmallVec::new();
        if let Some(dx) = dx {
            events.push(InputRecord::rel(REL_X, dx * step));
        }
        if let Some(dy) = dy {
            events.push(InputRecord::rel(REL_Y, dy * step));
        }
        self.emit(sink, &events)?;
        Ok(true)
    }

    // Write one frame: the given records followed by SYN_REPORT.
    fn emit(&self, sink: &mut dyn EventSink, events: &[InputRecord]) -> MapperResult<()> {
        let mut frame: Frame = events.iter().copied().collect();
        frame.push(InputRecord::syn_report());
        if self.debug {
            for event in &frame {
                log::debug!("out {}", event);
            }
        }
        sink.emit_frame(&frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::event::{EV_MSC, EV_REL, EV_SYN};
    use crate::mapping::{Direction, KeyTable, MouseTable};
    use crate::output::MemorySink;
    use crate::transform::clock::ManualClock;

    fn layered_policy() -> MappingTable {
        MappingTable {
            direct: KeyTable::from_pairs(&[(Key::CAPSLOCK, Key::ESC)]),
            mod_key: Some(Key::LEFTALT),
            modifier: KeyTable::from_pairs(&[(Key::K, Key::DOWN)]),
            mouse_key: Some(Key::LEFTMETA),
            mouse: MouseTable::from_pairs(&[
                (Key::SPACE, MouseAction::Button(Key::BTN_LEFT)),
                (Key::Y, MouseAction::WheelUp),
                (Key::N, MouseAction::WheelDown),
                (Key::L, MouseAction::Move(Direction::Right)),
                (Key::H, MouseAction::Move(Direction::Left)),
            ]),
            ..MappingTable::empty()
        }
    }

    fn feed(t: &mut Translator, clock: &ManualClock, sink: &mut MemorySink, events: &[InputRecord]) {
        for event in events {
            t.translate(event, clock, sink).unwrap();
        }
    }

    #[test]
    fn test_new_rejects_invalid_policy() {
        let policy = MappingTable {
            mod_key: Some(Key::A),
            mouse_key: Some(Key::A),
            ..MappingTable::empty()
        };
        assert!(matches!(Translator::new(policy), Err(MapperError::Argument(_))));
    }

    #[test]
    fn test_passthrough_unmapped_key() {
        let mut t = Translator::new(layered_policy()).unwrap();
        let clock = ManualClock::new(0);
        let mut sink = MemorySink::new();
        feed(&mut t, &clock, &mut sink, &[InputRecord::key(Key::A.code(), 1)]);
        assert_eq!(
            sink.payloads(),
            vec![(1, Key::A.code(), 1), (EV_SYN, 0, 0)]
        );
    }

    #[test]
    fn test_autorepeat_value_is_preserved() {
        let mut t = Translator::new(layered_policy()).unwrap();
        let clock = ManualClock::new(0);
        let mut sink = MemorySink::new();
        feed(&mut t, &clock, &mut sink, &[InputRecord::key(Key::CAPSLOCK.code(), 2)]);
        assert_eq!(sink.payloads()[0], (1, Key::ESC.code(), 2));
    }

    #[test]
    fn test_sync_and_misc_are_consumed() {
        let mut t = Translator::new(layered_policy()).unwrap();
        let clock = ManualClock::new(0);
        let mut sink = MemorySink::new();
        feed(
            &mut t,
            &clock,
            &mut sink,
            &[InputRecord::new(EV_MSC, 4, 0x70039), InputRecord::syn_report()],
        );
        assert!(sink.is_empty());
    }

    #[test]
    fn test_unexpected_type_is_integrity_error_only_in_debug() {
        let clock = ManualClock::new(0);
        let mut sink = MemorySink::new();
        let rel = InputRecord::new(EV_REL, REL_X, 3);

        let mut quiet = Translator::new(layered_policy()).unwrap();
        assert!(quiet.translate(&rel, &clock, &mut sink).is_ok());

        let mut debug = Translator::new(layered_policy()).unwrap().with_debug(true);
        assert!(matches!(
            debug.translate(&rel, &clock, &mut sink),
            Err(MapperError::Integrity(_))
        ));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_malformed_key_events() {
        let mut t = Translator::new(layered_policy()).unwrap();
        let clock = ManualClock::new(0);
        let mut sink = MemorySink::new();
        assert!(matches!(
            t.translate(&InputRecord::key(0x300, 1), &clock, &mut sink),
            Err(MapperError::Integrity(_))
        ));
        assert!(matches!(
            t.translate(&InputRecord::key(Key::A.code(), 7), &clock, &mut sink),
            Err(MapperError::Integrity(_))
        ));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_modifier_layer_swallows_unmapped() {
        let mut t = Translator::new(layered_policy()).unwrap();
        let clock = ManualClock::new(0);
        let mut sink = MemorySink::new();
        feed(
            &mut t,
            &clock,
            &mut sink,
            &[
                InputRecord::key(Key::LEFTALT.code(), 1),
                InputRecord::key(Key::Q.code(), 1),
                InputRecord::key(Key::Q.code(), 0),
            ],
        );
        assert!(sink.is_empty());
    }

    #[test]
    fn test_mouse_layer_swallows_unmapped() {
        let mut t = Translator::new(layered_policy()).unwrap();
        let clock = ManualClock::new(0);
        let mut sink = MemorySink::new();
        feed(
            &mut t,
            &clock,
            &mut sink,
            &[
                InputRecord::key(Key::LEFTMETA.code(), 1),
                InputRecord::key(Key::Q.code(), 1),
            ],
        );
        assert!(sink.is_empty());
    }

    #[test]
    fn test_wheel_down_tick() {
        let mut t = Translator::new(layered_policy()).unwrap();
        let clock = ManualClock::new(0);
        let mut sink = MemorySink::new();
        feed(
            &mut t,
            &clock,
            &mut sink,
            &[
                InputRecord::key(Key::LEFTMETA.code(), 1),
                InputRecord::key(Key::N.code(), 1),
                InputRecord::key(Key::N.code(), 0),
            ],
        );
        assert_eq!(
            sink.payloads(),
            vec![(EV_REL, REL_WHEEL, -1), (EV_SYN, 0, 0)]
        );
    }

    #[test]
    fn test_pump_idle_without_direction() {
        let mut t = Translator::new(layered_policy()).unwrap();
        let clock = ManualClock::new(0);
        let mut sink = MemorySink::new();
        feed(&mut t, &clock, &mut sink, &[InputRecord::key(Key::LEFTMETA.code(), 1)]);
        clock.advance(50);
        assert_eq!(t.pump_timeout_ms(&clock), None);
        assert!(!t.pump(&clock, &mut sink).unwrap());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_pump_waits_for_first_interval() {
        let mut t = Translator::new(layered_policy()).unwrap();
        let clock = ManualClock::new(1000);
        let mut sink = MemorySink::new();
        feed(
            &mut t,
            &clock,
            &mut sink,
            &[
                InputRecord::key(Key::LEFTMETA.code(), 1),
                InputRecord::key(Key::L.code(), 1),
            ],
        );
        assert_eq!(t.pump_timeout_ms(&clock), Some(10));
        clock.advance(4);
        assert!(!t.pump(&clock, &mut sink).unwrap());
        assert_eq!(t.pump_timeout_ms(&clock), Some(6));
        clock.advance(6);
        assert!(t.pump(&clock, &mut sink).unwrap());
        assert_eq!(sink.payloads(), vec![(EV_REL, REL_X, 2), (EV_SYN, 0, 0)]);
    }

    #[test]
    fn test_release_of_mouse_key_stops_pump() {
        let mut t = Translator::new(layered_policy()).unwrap();
        let clock = ManualClock::new(0);
        let mut sink = MemorySink::new();
        feed(
            &mut t,
            &clock,
            &mut sink,
            &[
                InputRecord::key(Key::LEFTMETA.code(), 1),
                InputRecord::key(Key::H.code(), 1),
                InputRecord::key(Key::LEFTMETA.code(), 0),
            ],
        );
        clock.advance(100);
        assert_eq!(t.pump_timeout_ms(&clock), None);
        assert!(!t.pump(&clock, &mut sink).unwrap());
        assert!(!t.state().motion_active());
    }

    #[test]
    fn test_direct_map_applies_after_layers_release() {
        let mut t = Translator::new(layered_policy()).unwrap();
        let clock = ManualClock::new(0);
        let mut sink = MemorySink::new();
        feed(
            &mut t,
            &clock,
            &mut sink,
            &[
                InputRecord::key(Key::LEFTALT.code(), 1),
                InputRecord::key(Key::LEFTALT.code(), 0),
                InputRecord::key(Key::CAPSLOCK.code(), 1),
            ],
        );
        assert_eq!(sink.payloads()[0], (1, Key::ESC.code(), 1));
    }

    #[test]
    fn test_release_is_routed_by_active_layer() {
        // A press made in the direct layer and released while a layer is
        // held goes to that layer, which has no entry for it.
        let mut t = Translator::new(layered_policy()).unwrap();
        let clock = ManualClock::new(0);
        let mut sink = MemorySink::new();
        feed(
            &mut t,
            &clock,
            &mut sink,
            &[
                InputRecord::key(Key::A.code(), 1),
                InputRecord::key(Key::LEFTALT.code(), 1),
                InputRecord::key(Key::A.code(), 0),
                InputRecord::key(Key::LEFTALT.code(), 0),
            ],
        );
        assert_eq!(sink.payloads(), vec![(1, Key::A.code(), 1), (0, 0, 0)]);
    }
}
