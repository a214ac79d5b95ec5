// Ubermap Output Layer
// Frame sinks: the uinput virtual device and an in-memory recorder

mod sink;
mod uinput;

pub use sink::{EventSink, MemorySink};
pub use uinput::{VIRTUAL_DEVICE_NAME, VIRTUAL_PRODUCT_ID, VIRTUAL_VENDOR_ID, VIRTUAL_VERSION};

#[cfg(feature = "device")]
pub use uinput::VirtualKeyboard;
