// Ubermap Input Layer - Device Discovery
// Enumerate keyboards under /dev/input and resolve --device values

use std::path::PathBuf;

use evdev::raw_stream::RawDevice;

use super::capabilities::{is_keyboard, is_virtual_device, DeviceCapabilities};
use super::filter::{is_device_path, select_device};
use crate::error::{MapperError, MapperResult};

/// A keyboard found during enumeration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    pub name: String,
    pub path: PathBuf,
}

fn device_name(device: &RawDevice) -> String {
    device.name().unwrap_or("Unknown").to_string()
}

/// All keyboards except our own virtual device, sorted by path.
pub fn list_keyboards() -> Vec<DeviceInfo> {
    let mut found: Vec<DeviceInfo> = evdev::raw_stream::enumerate()
        .filter(|(_, device)| {
            is_keyboard(&DeviceCapabilities::from_device(device))
                && !is_virtual_device(&device_name(device))
        })
        .map(|(path, device)| DeviceInfo {
            name: device_name(&device),
            path,
        })
        .collect();
    found.sort_by(|a, b| a.path.cmp(&b.path));
    found
}

/// Turn a path or a keyboard name into a device path.
///
/// Values starting with `/` are taken as paths and returned unchanged; the
/// acquirer reports a missing file. Names are matched against enumerated
/// keyboards, exact name first, then substring.
pub fn resolve_device_path(query: &str) -> MapperResult<PathBuf> {
    let query = query.trim();
    if query.is_empty() {
        return Err(MapperError::Argument("empty device name".to_string()));
    }
    if is_device_path(query) {
        return Ok(PathBuf::from(query));
    }

    let candidates: Vec<(String, String)> = list_keyboards()
        .into_iter()
        .map(|info| (info.name, info.path.to_string_lossy().into_owned()))
        .collect();
    match select_device(query, &candidates) {
        Some(path) => {
            log::debug!("Resolved device \"{}\" to {}", query, path);
            Ok(PathBuf::from(path))
        }
        None => Err(MapperError::Argument(format!(
            "no keyboard named \"{}\" (try --list-devices)",
            query
        ))),
    }
}
