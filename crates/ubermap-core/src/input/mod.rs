// Ubermap Input Layer
// Device detection, discovery and the device acquirer

mod capabilities;
pub mod event;
mod filter;

#[cfg(feature = "device")]
mod device;
#[cfg(feature = "device")]
mod discovery;

pub use capabilities::{is_keyboard, is_virtual_device, DeviceCapabilities};
pub use event::{is_key_event, is_transparent_event};
pub use filter::{is_device_path, select_device, DeviceAllowList};

#[cfg(feature = "device")]
pub use device::{record_from_event, AcquireOptions, DeviceHandle, DEFAULT_SETTLE_TIMEOUT};
#[cfg(feature = "device")]
pub use discovery::{list_keyboards, resolve_device_path, DeviceInfo};
