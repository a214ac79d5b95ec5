// Ubermap uinput Output Layer
// Virtual keyboard/mouse device that receives translated frames

/// Display name of the virtual device. Discovery never offers a device with
/// this name, so the mapper cannot grab its own output.
pub const VIRTUAL_DEVICE_NAME: &str = "UberKeyboardMapper";
pub const VIRTUAL_VENDOR_ID: u16 = 0x1234;
pub const VIRTUAL_PRODUCT_ID: u16 = 0x5678;
pub const VIRTUAL_VERSION: u16 = 1;

#[cfg(feature = "device")]
pub use imp::VirtualKeyboard;

#[cfg(feature = "device")]
mod imp {
    use evdev::uinput::{VirtualDevice, VirtualDeviceBuilder};
    use evdev::{AttributeSet, BusType, EventType, InputEvent, InputId, RelativeAxisType};
    use smallvec::SmallVec;

    use super::{VIRTUAL_DEVICE_NAME, VIRTUAL_PRODUCT_ID, VIRTUAL_VENDOR_ID, VIRTUAL_VERSION};
    use crate::error::{MapperError, MapperResult};
    use crate::event::InputRecord;
    use crate::key::KEY_CNT;
    use crate::output::EventSink;

    /// The synthetic output device.
    ///
    /// Registers every keycode below KEY_CNT (so any remap target and any
    /// mouse button can be emitted) plus REL_X, REL_Y and REL_WHEEL. The
    /// kernel destroys the device when this value is dropped.
    pub struct VirtualKeyboard {
        device: VirtualDevice,
    }

    impl VirtualKeyboard {
        pub fn create() -> MapperResult<Self> {
            let mut keys = AttributeSet::<evdev::Key>::new();
            for code in 0..KEY_CNT as u16 {
                keys.insert(evdev::Key::new(code));
            }

            let mut axes = AttributeSet::<RelativeAxisType>::new();
            axes.insert(RelativeAxisType::REL_X);
            axes.insert(RelativeAxisType::REL_Y);
            axes.insert(RelativeAxisType::REL_WHEEL);

            let device = VirtualDeviceBuilder::new()?
                .name(VIRTUAL_DEVICE_NAME)
                .input_id(InputId::new(
                    BusType::BUS_USB,
                    VIRTUAL_VENDOR_ID,
                    VIRTUAL_PRODUCT_ID,
                    VIRTUAL_VERSION,
                ))
                .with_keys(&keys)?
                .with_relative_axes(&axes)?
                .build()?;

            log::info!("Created virtual device \"{}\"", VIRTUAL_DEVICE_NAME);
            Ok(Self { device })
        }
    }

    impl EventSink for VirtualKeyboard {
        /// `VirtualDevice::emit` appends its own SYN_REPORT after the batch,
        /// so the frame body is written without the translator's terminator.
        fn emit_frame(&mut self, frame: &[InputRecord]) -> MapperResult<()> {
            let body = match frame.split_last() {
                Some((last, body)) if last.is_syn_report() => body,
                _ => {
                    return Err(MapperError::Integrity(
                        "output frame is missing its SYN_REPORT".to_string(),
                    ))
                }
            };
            let events: SmallVec<[InputEvent; 4]> = body
                .iter()
                .map(|r| InputEvent::new(EventType(r.kind), r.code, r.value))
                .collect();
            self.device.emit(&events)?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_virtual_identity() {
        assert_eq!(VIRTUAL_DEVICE_NAME, "UberKeyboardMapper");
        assert_eq!(VIRTUAL_VENDOR_ID, 0x1234);
        assert_eq!(VIRTUAL_PRODUCT_ID, 0x5678);
    }

    #[test]
    #[cfg(feature = "device")]
    fn test_create_virtual_keyboard() {
        // Needs write access to /dev/uinput
        match VirtualKeyboard::create() {
            Ok(_) => {}
            Err(e) => println!("Skipping test: cannot create uinput device: {}", e),
        }
    }
}
