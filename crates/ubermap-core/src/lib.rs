// Ubermap Core Library
// Event translation, mapping policy and device plumbing for the keyboard mapper

pub mod action;
pub mod config;
pub mod error;
pub mod event;
pub mod input;
pub mod key;
pub mod mapping;
pub mod output;
pub mod transform;

pub use action::Action;
pub use config::{Config, ConfigError};
pub use error::{MapperError, MapperResult};
pub use event::{EventLoop, EventSource, InputRecord, ResyncHandler, TimeVal};
pub use input::{is_keyboard, is_virtual_device, DeviceAllowList, DeviceCapabilities};
pub use key::{Key, KEY_CNT, KEY_MAX};
pub use mapping::{Direction, KeyTable, MappingTable, MouseAction, MouseSpeed, MouseTable, Preset};
pub use output::{EventSink, MemorySink};
pub use transform::{Clock, LayerState, ManualClock, MonotonicClock, Translator};

#[cfg(feature = "device")]
pub use input::{list_keyboards, resolve_device_path, AcquireOptions, DeviceHandle, DeviceInfo};
#[cfg(feature = "device")]
pub use output::VirtualKeyboard;
