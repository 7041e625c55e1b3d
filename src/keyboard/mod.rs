//! Keyboard devices.
//!
//! [`boot::BootKeyboard`] and [`nkro::NkroKeyboard`] carry the keyboard page,
//! [`consumer::ConsumerControl`] media keys and
//! [`system_control::SystemControl`] power keys. [`Keyboard`] bundles the four
//! and routes keyboard-page keys to whichever of boot and NKRO the host is
//! listening to.

pub mod boot;
pub mod consumer;
pub mod nkro;
pub mod system_control;

use bitflags::bitflags;
use log::debug;

use crate::drivers::usb::{HidError, ReportSink};
use crate::settings::ProtocolMode;
use crate::usage::{self, is_modifier};

use self::boot::BootKeyboard;
use self::consumer::ConsumerControl;
use self::nkro::NkroKeyboard;
use self::system_control::SystemControl;

bitflags! {
    /// Modifier byte of a keyboard report. Bit `n` is usage `0xE0 + n`.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const LEFT_CONTROL = 1 << 0;
        const LEFT_SHIFT = 1 << 1;
        const LEFT_ALT = 1 << 2;
        const LEFT_GUI = 1 << 3;
        const RIGHT_CONTROL = 1 << 4;
        const RIGHT_SHIFT = 1 << 5;
        const RIGHT_ALT = 1 << 6;
        const RIGHT_GUI = 1 << 7;
    }
}

impl Modifiers {
    /// The flag for modifier usage `key`, or `None` if `key` is not a
    /// modifier.
    pub const fn from_key(key: u8) -> Option<Self> {
        if is_modifier(key) {
            Some(Self::from_bits_truncate(1 << (key - usage::keyboard::LEFT_CONTROL)))
        } else {
            None
        }
    }
}

bitflags! {
    /// Keyboard LED output report, as set by the host.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Leds: u8 {
        const NUM_LOCK = 1 << 0;
        const CAPS_LOCK = 1 << 1;
        const SCROLL_LOCK = 1 << 2;
        const COMPOSE = 1 << 3;
        const KANA = 1 << 4;
    }
}

/// Operations shared by every key-carrying device.
///
/// `press` and `release` only change the report being built;
/// [`send_report`](KeyboardOps::send_report) pushes it to the host if it
/// differs from what the host last saw.
pub trait KeyboardOps {
    /// Usage type this device carries.
    type Key: Copy;

    /// Starts reporting. No-op unless the device needs setup.
    fn begin(&mut self) {}

    /// Releases every key and tells the host.
    fn end(&mut self) -> Result<(), HidError> {
        self.release_all();
        self.send_report()
    }

    /// Adds `key` to the report. Returns 1 if the key was accepted, 0 if it
    /// does not belong to this device or no slot is free.
    fn press(&mut self, key: Self::Key) -> usize;

    /// Removes `key` from the report. Returns 1 if the key belongs to this
    /// device, 0 otherwise.
    fn release(&mut self, key: Self::Key) -> usize;

    fn release_all(&mut self);

    fn send_report(&mut self) -> Result<(), HidError>;

    /// Whether `key` is in the report being built.
    fn is_key_pressed(&self, key: Self::Key) -> bool;

    /// Whether `key` was in the last report the host received.
    fn was_key_pressed(&self, key: Self::Key) -> bool;

    /// Whether the non-modifier keys differ from the last report sent.
    fn keycodes_changed(&self) -> bool;

    /// Types `key`: press, send, release, send.
    fn write(&mut self, key: Self::Key) -> Result<usize, HidError> {
        let accepted = self.press(key);
        if accepted == 0 {
            return Ok(0);
        }
        self.send_report()?;
        self.release(key);
        self.send_report()?;
        Ok(accepted)
    }
}

/// Modifier queries for keyboards whose report has a modifier byte.
pub trait ModifierOps {
    /// Modifiers in the report being built.
    fn modifiers(&self) -> Modifiers;

    /// Modifiers in the last report the host received.
    fn last_modifiers(&self) -> Modifiers;

    /// True if modifier `key` will be sent with the next report.
    fn is_modifier_active(&self, key: u8) -> bool {
        Modifiers::from_key(key).map_or(false, |flag| self.modifiers().contains(flag))
    }

    /// True if modifier `key` was held in the last report sent.
    fn was_modifier_active(&self, key: u8) -> bool {
        Modifiers::from_key(key).map_or(false, |flag| self.last_modifiers().contains(flag))
    }

    fn is_any_modifier_active(&self) -> bool {
        !self.modifiers().is_empty()
    }

    fn was_any_modifier_active(&self) -> bool {
        !self.last_modifiers().is_empty()
    }
}

/// Polls `sink` for a new LED output report and stores it in `leds`.
///
/// Returns `true` if the host sent one.
pub(crate) fn poll_leds<S: ReportSink + ?Sized>(sink: &mut S, leds: &mut Leds) -> Result<bool, HidError> {
    let mut buf = [0u8; 8];
    match sink.read_output(&mut buf) {
        Ok(0) | Err(nb::Error::WouldBlock) => Ok(false),
        Ok(_) => {
            let updated = Leds::from_bits_truncate(buf[0]);
            if updated != *leds {
                debug!("host LEDs changed: {:?} -> {:?}", leds, updated);
            }
            *leds = updated;
            Ok(true)
        }
        Err(nb::Error::Other(err)) => Err(err),
    }
}

/// The full keyboard a host sees: boot and NKRO keyboards, media keys and
/// system keys.
///
/// Keyboard-page keys go to the boot keyboard while the host has it in boot
/// protocol (BIOS, bootloaders) and to the NKRO keyboard otherwise.
#[derive(Debug)]
pub struct Keyboard<S: ReportSink> {
    boot: BootKeyboard<S>,
    nkro: NkroKeyboard<S>,
    consumer: ConsumerControl<S>,
    system: SystemControl<S>,
}

impl<S: ReportSink> Keyboard<S> {
    /// Bundles the four devices. Each should sit on its own interface.
    pub fn new(
        boot: BootKeyboard<S>,
        nkro: NkroKeyboard<S>,
        consumer: ConsumerControl<S>,
        system: SystemControl<S>,
    ) -> Self {
        Self {
            boot,
            nkro,
            consumer,
            system,
        }
    }

    /// The boot keyboard.
    pub fn boot(&self) -> &BootKeyboard<S> {
        &self.boot
    }

    /// Mutable access to the boot keyboard.
    pub fn boot_mut(&mut self) -> &mut BootKeyboard<S> {
        &mut self.boot
    }

    /// The NKRO keyboard.
    pub fn nkro(&self) -> &NkroKeyboard<S> {
        &self.nkro
    }

    /// Mutable access to the NKRO keyboard.
    pub fn nkro_mut(&mut self) -> &mut NkroKeyboard<S> {
        &mut self.nkro
    }

    /// The media keys.
    pub fn consumer(&self) -> &ConsumerControl<S> {
        &self.consumer
    }

    /// The system keys.
    pub fn system(&self) -> &SystemControl<S> {
        &self.system
    }

    /// Whether keyboard-page keys currently go to the boot keyboard.
    pub fn is_boot_active(&self) -> bool {
        self.boot.protocol() == ProtocolMode::Boot
    }

    /// Starts every device.
    pub fn begin(&mut self) {
        self.boot.begin();
        self.nkro.begin();
        self.consumer.begin();
        self.system.begin();
    }

    /// Releases everything on every device and tells the host.
    pub fn end(&mut self) -> Result<(), HidError> {
        self.release_all();
        self.send_report()
    }

    /// Presses keyboard-page `key` on the active keyboard.
    pub fn press(&mut self, key: u8) -> usize {
        if self.is_boot_active() {
            self.boot.press(key)
        } else {
            self.nkro.press(key)
        }
    }

    /// Releases keyboard-page `key` on the active keyboard.
    pub fn release(&mut self, key: u8) -> usize {
        if self.is_boot_active() {
            self.boot.release(key)
        } else {
            self.nkro.release(key)
        }
    }

    /// Presses consumer `usage`.
    pub fn press_consumer(&mut self, usage: u16) -> usize {
        self.consumer.press(usage)
    }

    /// Releases consumer `usage`.
    pub fn release_consumer(&mut self, usage: u16) -> usize {
        self.consumer.release(usage)
    }

    /// Presses system `key`, replacing any held one.
    pub fn press_system(&mut self, key: u8) -> usize {
        self.system.press(key)
    }

    /// Releases system `key`.
    pub fn release_system(&mut self, key: u8) -> usize {
        self.system.release(key)
    }

    /// Releases everything on every device without sending.
    pub fn release_all(&mut self) {
        self.boot.release_all();
        self.nkro.release_all();
        self.consumer.release_all();
        self.system.release_all();
    }

    /// Whether `key` is held on the active keyboard.
    pub fn is_key_pressed(&self, key: u8) -> bool {
        if self.is_boot_active() {
            self.boot.is_key_pressed(key)
        } else {
            self.nkro.is_key_pressed(key)
        }
    }

    /// Whether `key` was in the last report of the active keyboard.
    pub fn was_key_pressed(&self, key: u8) -> bool {
        if self.is_boot_active() {
            self.boot.was_key_pressed(key)
        } else {
            self.nkro.was_key_pressed(key)
        }
    }

    /// Modifiers of the active keyboard.
    pub fn modifiers(&self) -> Modifiers {
        if self.is_boot_active() {
            self.boot.modifiers()
        } else {
            self.nkro.modifiers()
        }
    }

    /// Flushes every device. All devices are flushed even if one fails; the
    /// first error is returned.
    pub fn send_report(&mut self) -> Result<(), HidError> {
        let boot = self.boot.send_report();
        let nkro = self.nkro.send_report();
        let consumer = self.consumer.send_report();
        let system = self.system.send_report();

        boot.and(nkro).and(consumer).and(system)
    }

    /// LED state of the active keyboard after polling both keyboards for a
    /// new output report.
    pub fn update_leds(&mut self) -> Result<Leds, HidError> {
        let boot = self.boot.update_leds();
        let nkro = self.nkro.update_leds();
        boot.and(nkro)?;

        Ok(if self.is_boot_active() {
            self.boot.leds()
        } else {
            self.nkro.leds()
        })
    }

    /// Picks up a protocol change made by the host and moves held keys to
    /// the keyboard that is now active. Returns `true` on a change.
    pub fn sync_protocol(&mut self) -> bool {
        let changed = self.boot.sync_protocol();
        if changed {
            self.hand_over_keys();
        }
        changed
    }

    /// Restores the default protocol after a USB bus reset.
    pub fn on_usb_reset(&mut self) {
        let before = self.boot.protocol();
        self.boot.on_usb_reset();
        if self.boot.protocol() != before {
            self.hand_over_keys();
        }
    }

    fn hand_over_keys(&mut self) {
        if self.is_boot_active() {
            debug!("keyboard switched to boot protocol");
            self.boot.report_mut().modifiers = self.nkro.modifiers();
            for key in self.nkro.pressed_keys() {
                self.boot.press(key);
            }
            self.nkro.release_all();
        } else {
            debug!("keyboard switched to report protocol");
            self.nkro.report_mut().modifiers = self.boot.modifiers();
            for key in self.boot.report().keycodes.iter().copied().filter(|&key| key != 0) {
                self.nkro.press(key);
            }
            self.boot.release_all();
        }
    }
}
