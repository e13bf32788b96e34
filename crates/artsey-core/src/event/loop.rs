// Artsey evdev Input Source
// Reads key events straight from Linux keyboards and feeds the event queue

use std::os::unix::io::AsRawFd;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use evdev::{Device, EventType};

use crate::event::{EventSender, InputError, InputResult};
use crate::input::{is_keyboard, matches_device_filter, translate_code, DeviceCapabilities, KeyEvent};
use crate::{Action, Key};

/// Poll timeout used by the reader thread, so it notices shutdown
const POLL_TIMEOUT_MS: i32 = 100;

/// Device information for listing devices
#[derive(Debug, Clone)]
pub struct DeviceInfo {
    /// Device index
    pub index: usize,
    /// Device name
    pub name: String,
    /// Device path (if available)
    pub path: Option<String>,
}

/// Reads keyboards through evdev.
///
/// Devices are only grabbed on request; without a grab the keys also reach
/// the focused application, like any passive key logger.
pub struct DeviceReader {
    devices: Vec<Device>,
    poll_fds: Vec<libc::pollfd>,
    grabbed: bool,
}

impl DeviceReader {
    /// Open every keyboard matching `filter_names` (all keyboards when empty)
    pub fn open(filter_names: &[String], grab: bool) -> InputResult<Self> {
        let mut devices = Self::find_keyboards(filter_names)?;

        if grab {
            // A previous instance may have crashed while holding the grab
            for device in &mut devices {
                let _ = device.ungrab();
            }
            for device in &mut devices {
                device.grab()?;
            }
        }

        for device in &devices {
            log::info!("Reading keys from {}", device.name().unwrap_or("Unknown"));
        }

        let poll_fds = Self::create_poll_fds(&devices);
        Ok(Self {
            devices,
            poll_fds,
            grabbed: grab,
        })
    }

    fn create_poll_fds(devices: &[Device]) -> Vec<libc::pollfd> {
        devices
            .iter()
            .map(|d| libc::pollfd {
                fd: d.as_raw_fd(),
                events: libc::POLLIN,
                revents: 0,
            })
            .collect()
    }

    /// List all available keyboard devices
    pub fn list_devices() -> InputResult<Vec<DeviceInfo>> {
        let devices_info: Vec<DeviceInfo> = evdev::enumerate()
            .filter(|(_, device)| is_keyboard(&Self::capabilities(device)))
            .enumerate()
            .map(|(index, (path, device))| DeviceInfo {
                index,
                name: device.name().unwrap_or("Unknown").to_string(),
                path: path.to_str().map(|s| s.to_string()),
            })
            .collect();

        if devices_info.is_empty() {
            return Err(InputError::DeviceNotFound(
                "No keyboard devices found".to_string(),
            ));
        }

        Ok(devices_info)
    }

    fn find_keyboards(filter_names: &[String]) -> InputResult<Vec<Device>> {
        let keyboards: Vec<Device> = evdev::enumerate()
            .filter(|(path, device)| {
                matches_device_filter(
                    device.name().unwrap_or("Unknown"),
                    path.to_str().unwrap_or_default(),
                    filter_names,
                    is_keyboard(&Self::capabilities(device)),
                )
            })
            .map(|(_, device)| device)
            .collect();

        if keyboards.is_empty() {
            let message = if filter_names.is_empty() {
                "No keyboard devices found".to_string()
            } else {
                format!("No device matches {:?}", filter_names)
            };
            return Err(InputError::DeviceNotFound(message));
        }

        Ok(keyboards)
    }

    fn capabilities(device: &Device) -> DeviceCapabilities {
        DeviceCapabilities::new(
            device.supported_events().contains(EventType::KEY),
            device
                .supported_keys()
                .map(|keys| keys.iter().map(|k| k.code()).collect::<Vec<u16>>())
                .unwrap_or_default(),
        )
    }

    /// Warn about devices that cannot type some of the chord keys
    pub fn check_keys(&self, keys: &[Key]) {
        for device in &self.devices {
            let missing = Self::capabilities(device).missing_keys(keys);
            if !missing.is_empty() {
                let names: Vec<String> = missing.iter().map(Key::to_string).collect();
                log::warn!(
                    "{} has no scan code for key(s) {}",
                    device.name().unwrap_or("Unknown"),
                    names.join(" ")
                );
            }
        }
    }

    /// Ungrab all devices (called on shutdown)
    pub fn ungrab_all(&mut self) {
        if self.grabbed {
            for device in &mut self.devices {
                let _ = device.ungrab();
            }
            self.grabbed = false;
        }
    }

    /// Wait up to `timeout_ms` for key events from any device.
    ///
    /// Returns an empty vector on timeout or EINTR.
    pub fn poll_events(&mut self, timeout_ms: i32) -> InputResult<Vec<KeyEvent>> {
        let mut events = Vec::new();

        let poll_result = unsafe {
            libc::poll(
                self.poll_fds.as_mut_ptr(),
                self.poll_fds.len() as libc::nfds_t,
                timeout_ms,
            )
        };

        if poll_result < 0 {
            let err = std::io::Error::last_os_error();
            if err.kind() == std::io::ErrorKind::Interrupted {
                return Ok(events);
            }
            return Err(InputError::Io(err));
        }

        if poll_result == 0 {
            return Ok(events);
        }

        for (i, device) in self.devices.iter_mut().enumerate() {
            if self.poll_fds[i].revents & libc::POLLIN == 0 {
                continue;
            }
            for event in device.fetch_events()? {
                if event.event_type() != EventType::KEY {
                    continue;
                }
                if let Some(action) = Action::from_i32(event.value()) {
                    events.push(KeyEvent::new(translate_code(event.code()), action));
                }
            }
        }

        Ok(events)
    }

    /// Get the names of all devices
    pub fn device_names(&self) -> Vec<String> {
        self.devices
            .iter()
            .map(|d| d.name().unwrap_or("Unknown").to_string())
            .collect()
    }

    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    /// Move the reader onto its own thread, forwarding events to `sender`
    /// until `running` is cleared or the consumer hangs up.
    pub fn spawn(mut self, sender: EventSender, running: Arc<AtomicBool>) -> JoinHandle<InputResult<()>> {
        thread::spawn(move || {
            while running.load(Ordering::SeqCst) {
                for event in self.poll_events(POLL_TIMEOUT_MS)? {
                    if !sender.send(event) {
                        return Ok(());
                    }
                }
            }
            Ok(())
        })
    }
}

/// Devices must never stay grabbed after the reader goes away, or the
/// keyboard is unusable.
impl Drop for DeviceReader {
    fn drop(&mut self) {
        self.ungrab_all();
    }
}
