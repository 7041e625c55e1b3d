#![cfg_attr(not(test), no_std)]

//! USB HID devices for keyboard firmware.
//!
//! Each device keeps the report it is building and the report the host last
//! saw, and only talks to the host when the two differ. Reports leave the
//! crate through a [`ReportSink`]; [`UsbHidSink`] puts one device on a
//! `usbd-hid` interface of any `usb-device` bus.
//!
//! Devices: [`BootKeyboard`], [`NkroKeyboard`], [`ConsumerControl`],
//! [`SystemControl`], the protocol-switching [`Keyboard`], [`Mouse`],
//! [`AbsoluteMouse`] and [`Gamepad`].

pub mod descriptors;
pub mod drivers;
pub mod gamepad;
pub mod keyboard;
pub mod keycodes;
pub mod mouse;
pub mod observer;
pub mod report;
pub mod settings;
pub mod usage;

#[cfg(test)]
mod testing;

pub use drivers::usb::hid::{InterfaceKind, UsbHidSink};
pub use drivers::usb::{HidError, ReportSink};
pub use gamepad::{DpadDirection, Gamepad, GamepadReport};
pub use keyboard::boot::{BootKeyboard, BootReport};
pub use keyboard::consumer::{ConsumerControl, ConsumerReport};
pub use keyboard::nkro::{NkroKeyboard, NkroReport};
pub use keyboard::system_control::{SystemControl, SystemControlReport};
pub use keyboard::{Keyboard, KeyboardOps, Leds, ModifierOps, Modifiers};
pub use mouse::{AbsoluteMouse, AbsoluteMouseReport, Mouse, MouseButtons, MouseReport};
pub use observer::{HidReportObserver, SendReportHook};
pub use report::{HidReport, InputReport, ReportBuffer, MAX_REPORT_LEN};
pub use settings::{HidSettings, ProtocolMode};

/// Report IDs, used as the Report ID item when devices share an interface
/// and to tell reports apart in the [observer](crate::observer).
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HidReportId {
    #[default]
    None = 0,
    Mouse = 1,
    Keyboard = 2,
    RawHid = 3,
    ConsumerControl = 4,
    SystemControl = 5,
    Gamepad = 6,
    MouseAbsolute = 7,
    NkroKeyboard = 8,
}

impl TryFrom<u8> for HidReportId {
    type Error = HidError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => HidReportId::None,
            1 => HidReportId::Mouse,
            2 => HidReportId::Keyboard,
            3 => HidReportId::RawHid,
            4 => HidReportId::ConsumerControl,
            5 => HidReportId::SystemControl,
            6 => HidReportId::Gamepad,
            7 => HidReportId::MouseAbsolute,
            8 => HidReportId::NkroKeyboard,
            _ => return Err(HidError::InvalidReport),
        })
    }
}
