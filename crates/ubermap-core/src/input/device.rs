// Ubermap Input Layer - Device Acquirer
// Exclusive grab of one keyboard plus the virtual output device

use std::io;
use std::os::unix::io::{AsRawFd, OwnedFd, RawFd};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, UNIX_EPOCH};

use evdev::raw_stream::RawDevice;
use evdev::InputEvent;

use super::capabilities::is_virtual_device;
use super::filter::DeviceAllowList;
use crate::error::{MapperError, MapperResult};
use crate::event::{poll_timeout, EventSource, InputRecord, TimeVal};
use crate::output::{EventSink, VirtualKeyboard};

/// How long to wait for held keys to be released before grabbing
pub const DEFAULT_SETTLE_TIMEOUT: Duration = Duration::from_millis(1000);

const SETTLE_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Options for `DeviceHandle::acquire`
#[derive(Debug, Clone)]
pub struct AcquireOptions {
    pub allow: DeviceAllowList,
    pub settle_timeout: Duration,
}

impl Default for AcquireOptions {
    fn default() -> Self {
        Self {
            allow: DeviceAllowList::any(),
            settle_timeout: DEFAULT_SETTLE_TIMEOUT,
        }
    }
}

/// The grabbed input device and the virtual output device, owned together.
///
/// Both are released by `release()` or, at the latest, on drop.
pub struct DeviceHandle {
    input: Option<RawDevice>,
    output: Option<VirtualKeyboard>,
    grabbed: bool,
    wake: Option<OwnedFd>,
    name: String,
    path: PathBuf,
}

impl DeviceHandle {
    /// Open `path`, create the virtual device, then grab the input.
    ///
    /// Anything acquired before a failing step is released before the error
    /// is returned.
    pub fn acquire(path: impl AsRef<Path>, options: &AcquireOptions) -> MapperResult<Self> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(MapperError::Argument("empty input device path".to_string()));
        }

        let input = RawDevice::open(path)?;
        let name = input.name().unwrap_or("Unknown").to_string();
        log::info!("Opened {} ({})", path.display(), name);

        if is_virtual_device(&name) {
            return Err(MapperError::Argument(format!(
                "{} is a virtual mapper device, refusing to grab it",
                path.display()
            )));
        }
        if options.allow.is_empty() {
            log::warn!("No device allow-list configured, accepting \"{}\"", name);
        } else if !options.allow.permits(&name) {
            return Err(MapperError::Argument(format!(
                "device \"{}\" is not in the allow-list {:?}",
                name,
                options.allow.patterns()
            )));
        }

        set_nonblocking(input.as_raw_fd())?;
        wait_for_key_release(&input, options.settle_timeout);

        let output = VirtualKeyboard::create()?;

        let mut handle = Self {
            input: Some(input),
            output: Some(output),
            grabbed: false,
            wake: None,
            name,
            path: path.to_path_buf(),
        };
        if let Some(input) = handle.input.as_mut() {
            input.grab()?;
        }
        handle.grabbed = true;
        log::info!("Grabbed {} exclusively", handle.path.display());
        Ok(handle)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_grabbed(&self) -> bool {
        self.grabbed
    }

    /// Also end the wait in `read_events` when `fd` turns readable.
    ///
    /// Meant for the read end of a signal self-pipe: a signal that lands
    /// between the stop-flag check and the poll still wakes the loop.
    pub fn set_wake_fd(&mut self, fd: impl Into<OwnedFd>) -> io::Result<()> {
        let fd = fd.into();
        set_nonblocking(fd.as_raw_fd())?;
        self.wake = Some(fd);
        Ok(())
    }

    pub fn is_released(&self) -> bool {
        self.input.is_none() && self.output.is_none()
    }

    /// Ungrab, destroy the virtual device and close both descriptors.
    ///
    /// Safe to call any number of times.
    pub fn release(&mut self) {
        if self.grabbed {
            if let Some(input) = self.input.as_mut() {
                if let Err(e) = input.ungrab() {
                    log::error!("Failed to ungrab {}: {}", self.path.display(), e);
                }
            }
            self.grabbed = false;
        }
        self.wake = None;
        let had_output = self.output.take().is_some();
        let had_input = self.input.take().is_some();
        if had_output || had_input {
            log::info!("Released {}", self.path.display());
        }
    }
}

impl Drop for DeviceHandle {
    fn drop(&mut self) {
        self.release();
    }
}

impl EventSource for DeviceHandle {
    fn read_events(&mut self, timeout_ms: Option<u64>) -> MapperResult<Vec<InputRecord>> {
        let input = self.input.as_mut().ok_or_else(released_error)?;

        let wake = self.wake.as_ref().map(|fd| fd.as_raw_fd());
        match wait_readable(input.as_raw_fd(), wake, poll_timeout(timeout_ms))? {
            Readiness::Input => {}
            Readiness::TimedOut | Readiness::Interrupted | Readiness::Woken => {
                return Ok(Vec::new())
            }
            Readiness::Hangup => {
                return Err(MapperError::Io(io::Error::new(
                    io::ErrorKind::BrokenPipe,
                    format!("input device {} went away", self.path.display()),
                )))
            }
        }

        match input.fetch_events() {
            Ok(events) => Ok(events.map(|e| record_from_event(&e)).collect()),
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => Err(MapperError::TryAgain),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl EventSink for DeviceHandle {
    fn emit_frame(&mut self, frame: &[InputRecord]) -> MapperResult<()> {
        self.output
            .as_mut()
            .ok_or_else(released_error)?
            .emit_frame(frame)
    }
}

fn released_error() -> MapperError {
    MapperError::Io(io::Error::new(
        io::ErrorKind::NotConnected,
        "device handle already released",
    ))
}

/// Convert an evdev event into the crate's record type.
pub fn record_from_event(event: &InputEvent) -> InputRecord {
    let time = event
        .timestamp()
        .duration_since(UNIX_EPOCH)
        .map(|d| TimeVal::new(d.as_secs() as i64, i64::from(d.subsec_micros())))
        .unwrap_or_default();
    InputRecord::new(event.event_type().0, event.code(), event.value()).with_time(time)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Readiness {
    Input,
    TimedOut,
    /// A signal interrupted the wait
    Interrupted,
    /// The wake descriptor fired; it has been drained
    Woken,
    Hangup,
}

fn wait_readable(input: RawFd, wake: Option<RawFd>, timeout: i32) -> io::Result<Readiness> {
    // poll(2) skips entries with a negative fd
    let mut fds = [
        libc::pollfd {
            fd: input,
            events: libc::POLLIN,
            revents: 0,
        },
        libc::pollfd {
            fd: wake.unwrap_or(-1),
            events: libc::POLLIN,
            revents: 0,
        },
    ];
    let rc = unsafe { libc::poll(fds.as_mut_ptr(), fds.len() as libc::nfds_t, timeout) };
    if rc < 0 {
        let err = io::Error::last_os_error();
        if err.kind() == io::ErrorKind::Interrupted {
            return Ok(Readiness::Interrupted);
        }
        return Err(err);
    }
    if rc == 0 {
        return Ok(Readiness::TimedOut);
    }
    if fds[1].revents & libc::POLLIN != 0 {
        drain(fds[1].fd);
        return Ok(Readiness::Woken);
    }
    if fds[0].revents & (libc::POLLERR | libc::POLLHUP | libc::POLLNVAL) != 0 {
        return Ok(Readiness::Hangup);
    }
    Ok(Readiness::Input)
}

fn drain(fd: RawFd) {
    let mut buf = [0u8; 64];
    while unsafe { libc::read(fd, buf.as_mut_ptr().cast(), buf.len()) } > 0 {}
}

fn set_nonblocking(fd: RawFd) -> io::Result<()> {
    let flags = unsafe { libc::fcntl(fd, libc::F_GETFL) };
    if flags < 0 {
        return Err(io::Error::last_os_error());
    }
    if unsafe { libc::fcntl(fd, libc::F_SETFL, flags | libc::O_NONBLOCK) } < 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

// Grabbing while a key is down leaves that key stuck in the desktop: the
// release goes to us instead. Wait a bounded time for the keyboard to go idle.
fn wait_for_key_release(device: &RawDevice, timeout: Duration) {
    let deadline = Instant::now() + timeout;
    loop {
        match device.get_key_state() {
            Ok(keys) if keys.iter().next().is_none() => return,
            Ok(_) => {}
            Err(e) => {
                log::debug!("Cannot read key state: {}", e);
                return;
            }
        }
        if Instant::now() >= deadline {
            log::warn!("Keys still held after {:?}, grabbing anyway", timeout);
            return;
        }
        std::thread::sleep(SETTLE_POLL_INTERVAL);
    }
}
