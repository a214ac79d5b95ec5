// Ubermap Transform Module
// Event translation: layer state, pointer pump and the translator itself

pub mod clock;
pub mod engine;
pub mod pump;
pub mod state;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use engine::Translator;
pub use pump::{step_size, PointerPump, PUMP_INTERVAL_MS};
pub use state::LayerState;
