//! Host-side stand-in for the USB interfaces of a keyboard.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use keyboardio_hid::{
    BootKeyboard, ConsumerControl, HidError, HidReportId, HidSettings, Keyboard, NkroKeyboard,
    ProtocolMode, ReportSink, SystemControl,
};

/// Everything the host received, in order, across all interfaces.
#[derive(Debug, Default)]
pub struct Host {
    pub reports: RefCell<Vec<(HidReportId, Vec<u8>)>>,
    pub protocol: Cell<Option<ProtocolMode>>,
    pub leds: RefCell<Option<Vec<u8>>>,
}

impl Host {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Reports received since the last call.
    pub fn take(&self) -> Vec<(HidReportId, Vec<u8>)> {
        self.reports.borrow_mut().drain(..).collect()
    }
}

/// One interface pointing at a shared [`Host`].
#[derive(Debug, Clone)]
pub struct HostSink {
    host: Rc<Host>,
    /// Only the boot keyboard interface answers protocol requests.
    protocol_aware: bool,
}

impl HostSink {
    pub fn new(host: &Rc<Host>) -> Self {
        Self {
            host: Rc::clone(host),
            protocol_aware: false,
        }
    }

    pub fn protocol_aware(host: &Rc<Host>) -> Self {
        Self {
            host: Rc::clone(host),
            protocol_aware: true,
        }
    }
}

impl ReportSink for HostSink {
    fn send_report(&mut self, id: HidReportId, report: &[u8]) -> Result<(), HidError> {
        self.host.reports.borrow_mut().push((id, report.to_vec()));
        Ok(())
    }

    fn read_output(&mut self, buf: &mut [u8]) -> nb::Result<usize, HidError> {
        let output = self.host.leds.borrow_mut().take().ok_or(nb::Error::WouldBlock)?;
        buf[..output.len()].copy_from_slice(&output);
        Ok(output.len())
    }

    fn protocol_mode(&self) -> Option<ProtocolMode> {
        if self.protocol_aware {
            self.host.protocol.get()
        } else {
            None
        }
    }
}

/// A composite keyboard wired to `host`, starting in `protocol`.
pub fn keyboard(host: &Rc<Host>, protocol: ProtocolMode) -> Keyboard<HostSink> {
    let settings = HidSettings::new().with_default_protocol(protocol);
    Keyboard::new(
        BootKeyboard::with_settings(HostSink::protocol_aware(host), &settings),
        NkroKeyboard::new(HostSink::new(host)),
        ConsumerControl::new(HostSink::new(host)),
        SystemControl::new(HostSink::new(host)),
    )
}
