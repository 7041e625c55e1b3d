//! N-key rollover keyboard: one bit per keyboard usage, so any number of
//! keys can be held at once.

use bit_field::BitArray;

use super::{poll_leds, KeyboardOps, Leds, ModifierOps, Modifiers};
use crate::drivers::usb::{HidError, ReportSink};
use crate::report::{self, InputReport, ReportBuffer};
use crate::usage::{self, is_printable};
use crate::HidReportId;

/// Bytes in the key bitmap, enough for usages `0x00..=0xDF`.
pub const NKRO_KEY_BYTES: usize = 28;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NkroReport {
    pub modifiers: Modifiers,
    pub keys: [u8; NKRO_KEY_BYTES],
}

impl NkroReport {
    pub const LEN: usize = 1 + NKRO_KEY_BYTES;

    /// Modifiers, then the key bitmap.
    pub fn to_bytes(&self) -> [u8; Self::LEN] {
        let mut bytes = [0u8; Self::LEN];
        bytes[0] = self.modifiers.bits();
        bytes[1..].copy_from_slice(&self.keys);
        bytes
    }

    /// Whether printable `key` is held.
    pub fn is_set(&self, key: u8) -> bool {
        is_printable(key) && self.keys[..].get_bit(key as usize)
    }

    fn set(&mut self, key: u8, held: bool) {
        self.keys[..].set_bit(key as usize, held);
    }
}

impl InputReport for NkroReport {
    const ID: HidReportId = HidReportId::NkroKeyboard;
    const LEN: usize = NkroReport::LEN;

    fn serialize(&self) -> ReportBuffer {
        report::buffer_from(&self.to_bytes())
    }
}

#[derive(Debug)]
pub struct NkroKeyboard<S> {
    sink: S,
    report: NkroReport,
    last_report: NkroReport,
    leds: Leds,
}

impl<S: ReportSink> NkroKeyboard<S> {
    /// Creates a keyboard with no key held.
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            report: NkroReport::default(),
            last_report: NkroReport::default(),
            leds: Leds::empty(),
        }
    }

    /// The report being built.
    pub fn report(&self) -> &NkroReport {
        &self.report
    }

    /// Mutable access to the report being built.
    pub fn report_mut(&mut self) -> &mut NkroReport {
        &mut self.report
    }

    /// Replaces the report being built.
    pub fn set_report(&mut self, report: NkroReport) {
        self.report = report;
    }

    /// The last report the host received.
    pub fn last_report(&self) -> &NkroReport {
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

    /// Drops the keyboard state and returns the sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Non-modifier keys in the report being built, lowest usage first.
    pub fn pressed_keys(&self) -> impl Iterator<Item = u8> + '_ {
        (1..=usage::keyboard::KEYPAD_HEXADECIMAL).filter(move |&key| self.report.is_set(key))
    }

    /// LED state last set by the host.
    pub fn leds(&self) -> Leds {
        self.leds
    }

    /// Polls for a new LED output report.
    pub fn update_leds(&mut self) -> Result<Leds, HidError> {
        poll_leds(&mut self.sink, &mut self.leds)?;
        Ok(self.leds)
    }

    fn push(&mut self, report: NkroReport) -> Result<(), HidError> {
        report::send(&mut self.sink, &report)?;
        self.last_report = report;
        Ok(())
    }
}

impl<S: ReportSink> KeyboardOps for NkroKeyboard<S> {
    type Key = u8;

    fn press(&mut self, key: u8) -> usize {
        if let Some(modifier) = Modifiers::from_key(key) {
            self.report.modifiers |= modifier;
            1
        } else if key != 0 && is_printable(key) {
            self.report.set(key, true);
            1
        } else {
            0
        }
    }

    fn release(&mut self, key: u8) -> usize {
        if let Some(modifier) = Modifiers::from_key(key) {
            self.report.modifiers &= !modifier;
            1
        } else if key != 0 && is_printable(key) {
            self.report.set(key, false);
            1
        } else {
            0
        }
    }

    fn release_all(&mut self) {
        self.report = NkroReport::default();
    }

    /// Sends the report in up to three steps so the host never sees a new
    /// modifier combined with a key that was released in the same scan
    /// (releasing `a` while pressing shift must not type `A`):
    ///
    /// 1. keys released since the last report, old modifiers,
    /// 2. new modifiers,
    /// 3. newly pressed keys.
    fn send_report(&mut self) -> Result<(), HidError> {
        if self.report.modifiers != self.last_report.modifiers {
            let mut released = self.last_report;
            let mut any_released = false;

            for (last, current) in released.keys.iter_mut().zip(self.report.keys.iter()) {
                let released_bits = *last & !current;
                if released_bits != 0 {
                    *last &= !released_bits;
                    any_released = true;
                }
            }

            if any_released {
                self.push(released)?;
            }

            let mut modifiers_changed = self.last_report;
            modifiers_changed.modifiers = self.report.modifiers;
            self.push(modifiers_changed)?;
        }

        if self.keycodes_changed() {
            let report = self.report;
            self.push(report)?;
        }

        Ok(())
    }

    fn is_key_pressed(&self, key: u8) -> bool {
        key != 0 && self.report.is_set(key)
    }

    fn was_key_pressed(&self, key: u8) -> bool {
        key != 0 && self.last_report.is_set(key)
    }

    fn keycodes_changed(&self) -> bool {
        self.report.keys != self.last_report.keys
    }
}

impl<S: ReportSink> ModifierOps for NkroKeyboard<S> {
    fn modifiers(&self) -> Modifiers {
        self.report.modifiers
    }

    fn last_modifiers(&self) -> Modifiers {
        self.last_report.modifiers
    }
}
