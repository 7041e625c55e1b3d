//! Boot protocol keyboard: modifier byte plus six key slots, readable by a
//! BIOS without a report descriptor parser.

use log::{debug, warn};

use super::{poll_leds, KeyboardOps, Leds, ModifierOps, Modifiers};
use crate::drivers::usb::{HidError, ReportSink};
use crate::keycodes;
use crate::report::{self, InputReport, ReportBuffer};
use crate::settings::{HidSettings, ProtocolMode};
use crate::usage::{is_modifier, is_printable};
use crate::HidReportId;

/// Number of simultaneous non-modifier keys in a boot report.
pub const BOOT_KEY_SLOTS: usize = 6;

/// Boot keyboard input report.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BootReport {
    pub modifiers: Modifiers,
    pub keycodes: [u8; BOOT_KEY_SLOTS],
}

impl BootReport {
    pub const LEN: usize = 2 + BOOT_KEY_SLOTS;

    /// Modifiers, a reserved byte, then the six key slots.
    pub fn to_bytes(&self) -> [u8; Self::LEN] {
        let mut bytes = [0u8; Self::LEN];
        bytes[0] = self.modifiers.bits();
        bytes[2..].copy_from_slice(&self.keycodes);
        bytes
    }
}

impl InputReport for BootReport {
    const ID: HidReportId = HidReportId::Keyboard;
    const LEN: usize = BootReport::LEN;

    fn serialize(&self) -> ReportBuffer {
        report::buffer_from(&self.to_bytes())
    }
}

#[derive(Debug)]
pub struct BootKeyboard<S> {
    sink: S,
    report: BootReport,
    last_report: BootReport,
    leds: Leds,
    default_protocol: ProtocolMode,
    protocol: ProtocolMode,
    idle: u8,
}

impl<S: ReportSink> BootKeyboard<S> {
    /// Creates a boot keyboard with the feature-selected settings.
    pub fn new(sink: S) -> Self {
        Self::with_settings(sink, &HidSettings::new())
    }

    /// Creates a boot keyboard starting in `settings.default_protocol`.
    pub fn with_settings(sink: S, settings: &HidSettings) -> Self {
        Self {
            sink,
            report: BootReport::default(),
            last_report: BootReport::default(),
            leds: Leds::empty(),
            default_protocol: settings.default_protocol,
            protocol: settings.default_protocol,
            idle: 0,
        }
    }

    /// The report being built.
    pub fn report(&self) -> &BootReport {
        &self.report
    }

    /// Mutable access to the report being built.
    pub fn report_mut(&mut self) -> &mut BootReport {
        &mut self.report
    }

    /// Replaces the report being built.
    pub fn set_report(&mut self, report: BootReport) {
        self.report = report;
    }

    /// The last report the host received.
    pub fn last_report(&self) -> &BootReport {
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

    /// Gives the sink back, e.g. to build another device on the same
    /// interface.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Protocol the host is using.
    pub fn protocol(&self) -> ProtocolMode {
        self.protocol
    }

    /// Records a protocol change.
    pub fn set_protocol(&mut self, protocol: ProtocolMode) {
        if protocol != self.protocol {
            debug!("boot keyboard protocol: {:?} -> {:?}", self.protocol, protocol);
        }
        self.protocol = protocol;
    }

    /// Protocol restored by [`on_usb_reset`](BootKeyboard::on_usb_reset).
    pub fn default_protocol(&self) -> ProtocolMode {
        self.default_protocol
    }

    /// Switches back to the default protocol after a USB reset.
    pub fn on_usb_reset(&mut self) {
        self.set_protocol(self.default_protocol);
    }

    /// Adopts the protocol the host last set on the interface, if the sink
    /// knows it. Returns `true` if the protocol changed.
    pub fn sync_protocol(&mut self) -> bool {
        match self.sink.protocol_mode() {
            Some(protocol) if protocol != self.protocol => {
                self.set_protocol(protocol);
                true
            }
            _ => false,
        }
    }

    /// Idle rate set by the host, in 4 ms units. 0 means report only on
    /// change.
    pub fn idle(&self) -> u8 {
        self.idle
    }

    /// Stores the idle rate set by the host.
    pub fn set_idle(&mut self, idle: u8) {
        self.idle = idle;
    }

    /// LED state last sent by the host.
    pub fn leds(&self) -> Leds {
        self.leds
    }

    /// Polls the host for a new LED output report.
    pub fn update_leds(&mut self) -> Result<Leds, HidError> {
        poll_leds(&mut self.sink, &mut self.leds)?;
        Ok(self.leds)
    }
}

impl<S: ReportSink> KeyboardOps for BootKeyboard<S> {
    type Key = u8;

    fn press(&mut self, key: u8) -> usize {
        if let Some(modifier) = Modifiers::from_key(key) {
            self.report.modifiers |= modifier;
            return 1;
        }
        if key == 0 || !is_printable(key) {
            return 0;
        }
        if keycodes::insert_key(&mut self.report.keycodes, key) {
            1
        } else {
            warn!("boot report full, dropping key {:#04x}", key);
            0
        }
    }

    fn release(&mut self, key: u8) -> usize {
        if let Some(modifier) = Modifiers::from_key(key) {
            self.report.modifiers &= !modifier;
            return 1;
        }
        if key == 0 || !is_printable(key) {
            return 0;
        }
        keycodes::remove_key(&mut self.report.keycodes, key);
        1
    }

    fn release_all(&mut self) {
        self.report = BootReport::default();
    }

    fn send_report(&mut self) -> Result<(), HidError> {
        if self.report == self.last_report {
            return Ok(());
        }
        let report = self.report;
        report::send(&mut self.sink, &report)?;
        self.last_report = report;
        Ok(())
    }

    fn is_key_pressed(&self, key: u8) -> bool {
        key != 0 && is_printable(key) && self.report.keycodes.contains(&key)
    }

    fn was_key_pressed(&self, key: u8) -> bool {
        key != 0 && is_printable(key) && self.last_report.keycodes.contains(&key)
    }

    fn keycodes_changed(&self) -> bool {
        self.report.keycodes != self.last_report.keycodes
    }
}

impl<S: ReportSink> ModifierOps for BootKeyboard<S> {
    fn modifiers(&self) -> Modifiers {
        self.report.modifiers
    }

    fn last_modifiers(&self) -> Modifiers {
        self.last_report.modifiers
    }
}

/// True if `key` fits in a boot report at all.
pub const fn is_boot_key(key: u8) -> bool {
    (key != 0 && is_printable(key)) || is_modifier(key)
}
