//! System Control: power down, sleep, wake and friends. The report holds a
//! single key.

use super::KeyboardOps;
use crate::drivers::usb::{HidError, ReportSink};
use crate::report::{self, InputReport, ReportBuffer};
use crate::usage::is_system_control;
use crate::HidReportId;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SystemControlReport {
    pub key: u8,
}

impl SystemControlReport {
    pub const LEN: usize = 1;

    /// The held key, or 0.
    pub fn to_bytes(&self) -> [u8; Self::LEN] {
        [self.key]
    }
}

impl InputReport for SystemControlReport {
    const ID: HidReportId = HidReportId::SystemControl;
    const LEN: usize = SystemControlReport::LEN;

    fn serialize(&self) -> ReportBuffer {
        report::buffer_from(&self.to_bytes())
    }
}

#[derive(Debug)]
pub struct SystemControl<S> {
    sink: S,
    report: SystemControlReport,
    last_report: SystemControlReport,
}

impl<S: ReportSink> SystemControl<S> {
    /// Creates a device with no key held.
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            report: SystemControlReport::default(),
            last_report: SystemControlReport::default(),
        }
    }

    /// The report being built.
    pub fn report(&self) -> &SystemControlReport {
        &self.report
    }

    /// The last report the host received.
    pub fn last_report(&self) -> &SystemControlReport {
        &self.last_report
    }

    /// The sink reports go to.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Drops the device state and returns the sink.
    pub fn into_sink(self) -> S {
        self.sink
    }
}

impl<S: ReportSink> KeyboardOps for SystemControl<S> {
    type Key = u8;

    /// Replaces whatever system key is held.
    fn press(&mut self, key: u8) -> usize {
        if !is_system_control(key) {
            return 0;
        }
        self.report.key = key;
        1
    }

    fn release(&mut self, key: u8) -> usize {
        if !is_system_control(key) {
            return 0;
        }
        if self.report.key == key {
            self.report.key = 0;
        }
        1
    }

    fn release_all(&mut self) {
        self.report = SystemControlReport::default();
    }

    fn send_report(&mut self) -> Result<(), HidError> {
        if !self.keycodes_changed() {
            return Ok(());
        }
        let report = self.report;
        report::send(&mut self.sink, &report)?;
        self.last_report = report;
        Ok(())
    }

    fn is_key_pressed(&self, key: u8) -> bool {
        is_system_control(key) && self.report.key == key
    }

    fn was_key_pressed(&self, key: u8) -> bool {
        is_system_control(key) && self.last_report.key == key
    }

    fn keycodes_changed(&self) -> bool {
        self.report != self.last_report
    }
}
