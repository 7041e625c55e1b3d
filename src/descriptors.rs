//! HID report descriptors for every report this crate sends.
//!
//! Each descriptor describes one top-level application collection. The
//! `*_WITH_ID` variants carry a Report ID item so several devices can share
//! one interface; their reports are then prefixed with the matching
//! [`HidReportId`].

use crate::HidReportId;

/// Offset of the first item after `Usage Page`, `Usage`, `Collection`.
const REPORT_ID_OFFSET: usize = 6;

/// Copies `descriptor`, inserting a `Report ID (id)` item right after the
/// opening application collection. `M` must be `descriptor.len() + 2`.
const fn with_report_id<const M: usize>(descriptor: &[u8], id: HidReportId) -> [u8; M] {
    assert!(M == descriptor.len() + 2);
    assert!(descriptor[REPORT_ID_OFFSET - 2] == 0xA1);

    let mut out = [0u8; M];
    let mut i = 0;
    while i < REPORT_ID_OFFSET {
        out[i] = descriptor[i];
        i += 1;
    }
    out[REPORT_ID_OFFSET] = 0x85;
    out[REPORT_ID_OFFSET + 1] = id as u8;
    while i < descriptor.len() {
        out[i + 2] = descriptor[i];
        i += 1;
    }
    out
}

#[rustfmt::skip]
pub const BOOT_KEYBOARD: &[u8] = &[
    0x05, 0x01,        // Usage Page (Generic Desktop)
    0x09, 0x06,        // Usage (Keyboard)
    0xA1, 0x01,        // Collection (Application)

    // Modifier keys
    0x05, 0x07,        //   Usage Page (Keyboard/Keypad)
    0x19, 0xE0,        //   Usage Minimum (Left Control)
    0x29, 0xE7,        //   Usage Maximum (Right GUI)
    0x15, 0x00,        //   Logical Minimum (0)
    0x25, 0x01,        //   Logical Maximum (1)
    0x75, 0x01,        //   Report Size (1)
    0x95, 0x08,        //   Report Count (8)
    0x81, 0x02,        //   Input (Data,Var,Abs)

    // Reserved byte
    0x75, 0x08,        //   Report Size (8)
    0x95, 0x01,        //   Report Count (1)
    0x81, 0x01,        //   Input (Const)

    // LEDs
    0x05, 0x08,        //   Usage Page (LEDs)
    0x19, 0x01,        //   Usage Minimum (Num Lock)
    0x29, 0x05,        //   Usage Maximum (Kana)
    0x75, 0x01,        //   Report Size (1)
    0x95, 0x05,        //   Report Count (5)
    0x91, 0x02,        //   Output (Data,Var,Abs)
    0x75, 0x03,        //   Report Size (3)
    0x95, 0x01,        //   Report Count (1)
    0x91, 0x01,        //   Output (Const)

    // Key array
    0x05, 0x07,        //   Usage Page (Keyboard/Keypad)
    0x19, 0x00,        //   Usage Minimum (0)
    0x29, 0xDD,        //   Usage Maximum (Keypad Hexadecimal)
    0x15, 0x00,        //   Logical Minimum (0)
    0x26, 0xDD, 0x00,  //   Logical Maximum (0xDD)
    0x75, 0x08,        //   Report Size (8)
    0x95, 0x06,        //   Report Count (6)
    0x81, 0x00,        //   Input (Data,Array,Abs)

    0xC0,              // End Collection
];

#[rustfmt::skip]
pub const NKRO_KEYBOARD: &[u8] = &[
    0x05, 0x01,        // Usage Page (Generic Desktop)
    0x09, 0x06,        // Usage (Keyboard)
    0xA1, 0x01,        // Collection (Application)

    // Modifier keys
    0x05, 0x07,        //   Usage Page (Keyboard/Keypad)
    0x19, 0xE0,        //   Usage Minimum (Left Control)
    0x29, 0xE7,        //   Usage Maximum (Right GUI)
    0x15, 0x00,        //   Logical Minimum (0)
    0x25, 0x01,        //   Logical Maximum (1)
    0x75, 0x01,        //   Report Size (1)
    0x95, 0x08,        //   Report Count (8)
    0x81, 0x02,        //   Input (Data,Var,Abs)

    // LEDs
    0x05, 0x08,        //   Usage Page (LEDs)
    0x19, 0x01,        //   Usage Minimum (Num Lock)
    0x29, 0x05,        //   Usage Maximum (Kana)
    0x75, 0x01,        //   Report Size (1)
    0x95, 0x05,        //   Report Count (5)
    0x91, 0x02,        //   Output (Data,Var,Abs)
    0x75, 0x03,        //   Report Size (3)
    0x95, 0x01,        //   Report Count (1)
    0x91, 0x01,        //   Output (Const)

    // Key bitmap, one bit per usage 0x00..=0xDF
    0x05, 0x07,        //   Usage Page (Keyboard/Keypad)
    0x19, 0x00,        //   Usage Minimum (0)
    0x29, 0xDF,        //   Usage Maximum (0xDF)
    0x15, 0x00,        //   Logical Minimum (0)
    0x25, 0x01,        //   Logical Maximum (1)
    0x75, 0x01,        //   Report Size (1)
    0x96, 0xE0, 0x00,  //   Report Count (224)
    0x81, 0x02,        //   Input (Data,Var,Abs)

    0xC0,              // End Collection
];

#[rustfmt::skip]
pub const CONSUMER_CONTROL: &[u8] = &[
    0x05, 0x0C,        // Usage Page (Consumer)
    0x09, 0x01,        // Usage (Consumer Control)
    0xA1, 0x01,        // Collection (Application)
    0x15, 0x00,        //   Logical Minimum (0)
    0x26, 0xFF, 0x03,  //   Logical Maximum (0x3FF)
    0x19, 0x00,        //   Usage Minimum (0)
    0x2A, 0xFF, 0x03,  //   Usage Maximum (0x3FF)
    0x75, 0x10,        //   Report Size (16)
    0x95, 0x04,        //   Report Count (4)
    0x81, 0x00,        //   Input (Data,Array,Abs)
    0xC0,              // End Collection
];

#[rustfmt::skip]
pub const SYSTEM_CONTROL: &[u8] = &[
    0x05, 0x01,        // Usage Page (Generic Desktop)
    0x09, 0x80,        // Usage (System Control)
    0xA1, 0x01,        // Collection (Application)
    0x15, 0x00,        //   Logical Minimum (0)
    0x26, 0xFF, 0x00,  //   Logical Maximum (0xFF)
    0x19, 0x00,        //   Usage Minimum (0)
    0x29, 0xFF,        //   Usage Maximum (0xFF)
    0x75, 0x08,        //   Report Size (8)
    0x95, 0x01,        //   Report Count (1)
    0x81, 0x00,        //   Input (Data,Array,Abs)
    0xC0,              // End Collection
];

#[rustfmt::skip]
pub const MOUSE: &[u8] = &[
    0x05, 0x01,        // Usage Page (Generic Desktop)
    0x09, 0x02,        // Usage (Mouse)
    0xA1, 0x01,        // Collection (Application)
    0x09, 0x01,        //   Usage (Pointer)
    0xA1, 0x00,        //   Collection (Physical)

    // Buttons 1-5
    0x05, 0x09,        //     Usage Page (Button)
    0x19, 0x01,        //     Usage Minimum (1)
    0x29, 0x05,        //     Usage Maximum (5)
    0x15, 0x00,        //     Logical Minimum (0)
    0x25, 0x01,        //     Logical Maximum (1)
    0x75, 0x01,        //     Report Size (1)
    0x95, 0x05,        //     Report Count (5)
    0x81, 0x02,        //     Input (Data,Var,Abs)
    0x75, 0x03,        //     Report Size (3)
    0x95, 0x01,        //     Report Count (1)
    0x81, 0x03,        //     Input (Const,Var,Abs)

    // X, Y, wheel
    0x05, 0x01,        //     Usage Page (Generic Desktop)
    0x09, 0x30,        //     Usage (X)
    0x09, 0x31,        //     Usage (Y)
    0x09, 0x38,        //     Usage (Wheel)
    0x15, 0x81,        //     Logical Minimum (-127)
    0x25, 0x7F,        //     Logical Maximum (127)
    0x75, 0x08,        //     Report Size (8)
    0x95, 0x03,        //     Report Count (3)
    0x81, 0x06,        //     Input (Data,Var,Rel)

    // Horizontal wheel
    0x05, 0x0C,        //     Usage Page (Consumer)
    0x0A, 0x38, 0x02,  //     Usage (AC Pan)
    0x15, 0x81,        //     Logical Minimum (-127)
    0x25, 0x7F,        //     Logical Maximum (127)
    0x75, 0x08,        //     Report Size (8)
    0x95, 0x01,        //     Report Count (1)
    0x81, 0x06,        //     Input (Data,Var,Rel)

    0xC0,              //   End Collection
    0xC0,              // End Collection
];

#[rustfmt::skip]
pub const ABSOLUTE_MOUSE: &[u8] = &[
    0x05, 0x01,        // Usage Page (Generic Desktop)
    0x09, 0x02,        // Usage (Mouse)
    0xA1, 0x01,        // Collection (Application)
    0x09, 0x01,        //   Usage (Pointer)
    0xA1, 0x00,        //   Collection (Physical)

    // Buttons 1-5
    0x05, 0x09,        //     Usage Page (Button)
    0x19, 0x01,        //     Usage Minimum (1)
    0x29, 0x05,        //     Usage Maximum (5)
    0x15, 0x00,        //     Logical Minimum (0)
    0x25, 0x01,        //     Logical Maximum (1)
    0x75, 0x01,        //     Report Size (1)
    0x95, 0x05,        //     Report Count (5)
    0x81, 0x02,        //     Input (Data,Var,Abs)
    0x75, 0x03,        //     Report Size (3)
    0x95, 0x01,        //     Report Count (1)
    0x81, 0x03,        //     Input (Const,Var,Abs)

    // Absolute X, Y
    0x05, 0x01,        //     Usage Page (Generic Desktop)
    0x09, 0x30,        //     Usage (X)
    0x09, 0x31,        //     Usage (Y)
    0x15, 0x00,        //     Logical Minimum (0)
    0x26, 0xFF, 0x7F,  //     Logical Maximum (32767)
    0x75, 0x10,        //     Report Size (16)
    0x95, 0x02,        //     Report Count (2)
    0x81, 0x02,        //     Input (Data,Var,Abs)

    // Wheel
    0x09, 0x38,        //     Usage (Wheel)
    0x15, 0x81,        //     Logical Minimum (-127)
    0x25, 0x7F,        //     Logical Maximum (127)
    0x75, 0x08,        //     Report Size (8)
    0x95, 0x01,        //     Report Count (1)
    0x81, 0x06,        //     Input (Data,Var,Rel)

    // Horizontal wheel
    0x05, 0x0C,        //     Usage Page (Consumer)
    0x0A, 0x38, 0x02,  //     Usage (AC Pan)
    0x15, 0x81,        //     Logical Minimum (-127)
    0x25, 0x7F,        //     Logical Maximum (127)
    0x75, 0x08,        //     Report Size (8)
    0x95, 0x01,        //     Report Count (1)
    0x81, 0x06,        //     Input (Data,Var,Rel)

    0xC0,              //   End Collection
    0xC0,              // End Collection
];

#[rustfmt::skip]
pub const GAMEPAD: &[u8] = &[
    0x05, 0x01,        // Usage Page (Generic Desktop)
    0x09, 0x05,        // Usage (Game Pad)
    0xA1, 0x01,        // Collection (Application)

    // 32 buttons
    0x05, 0x09,        //   Usage Page (Button)
    0x19, 0x01,        //   Usage Minimum (1)
    0x29, 0x20,        //   Usage Maximum (32)
    0x15, 0x00,        //   Logical Minimum (0)
    0x25, 0x01,        //   Logical Maximum (1)
    0x75, 0x01,        //   Report Size (1)
    0x95, 0x20,        //   Report Count (32)
    0x81, 0x02,        //   Input (Data,Var,Abs)

    // X, Y
    0x05, 0x01,        //   Usage Page (Generic Desktop)
    0x09, 0x30,        //   Usage (X)
    0x09, 0x31,        //   Usage (Y)
    0x16, 0x00, 0x80,  //   Logical Minimum (-32768)
    0x26, 0xFF, 0x7F,  //   Logical Maximum (32767)
    0x75, 0x10,        //   Report Size (16)
    0x95, 0x02,        //   Report Count (2)
    0x81, 0x02,        //   Input (Data,Var,Abs)

    // Z
    0x09, 0x32,        //   Usage (Z)
    0x15, 0x80,        //   Logical Minimum (-128)
    0x25, 0x7F,        //   Logical Maximum (127)
    0x75, 0x08,        //   Report Size (8)
    0x95, 0x01,        //   Report Count (1)
    0x81, 0x02,        //   Input (Data,Var,Abs)

    // Rx, Ry
    0x09, 0x33,        //   Usage (Rx)
    0x09, 0x34,        //   Usage (Ry)
    0x16, 0x00, 0x80,  //   Logical Minimum (-32768)
    0x26, 0xFF, 0x7F,  //   Logical Maximum (32767)
    0x75, 0x10,        //   Report Size (16)
    0x95, 0x02,        //   Report Count (2)
    0x81, 0x02,        //   Input (Data,Var,Abs)

    // Rz
    0x09, 0x35,        //   Usage (Rz)
    0x15, 0x80,        //   Logical Minimum (-128)
    0x25, 0x7F,        //   Logical Maximum (127)
    0x75, 0x08,        //   Report Size (8)
    0x95, 0x01,        //   Report Count (1)
    0x81, 0x02,        //   Input (Data,Var,Abs)

    // Two hat switches
    0x09, 0x39,        //   Usage (Hat switch)
    0x09, 0x39,        //   Usage (Hat switch)
    0x15, 0x01,        //   Logical Minimum (1)
    0x25, 0x08,        //   Logical Maximum (8)
    0x35, 0x00,        //   Physical Minimum (0)
    0x46, 0x3B, 0x01,  //   Physical Maximum (315)
    0x65, 0x14,        //   Unit (Degrees)
    0x75, 0x04,        //   Report Size (4)
    0x95, 0x02,        //   Report Count (2)
    0x81, 0x42,        //   Input (Data,Var,Abs,Null State)
    0x65, 0x00,        //   Unit (None)

    0xC0,              // End Collection
];

pub static BOOT_KEYBOARD_WITH_ID: [u8; BOOT_KEYBOARD.len() + 2] =
    with_report_id(BOOT_KEYBOARD, HidReportId::Keyboard);
pub static NKRO_KEYBOARD_WITH_ID: [u8; NKRO_KEYBOARD.len() + 2] =
    with_report_id(NKRO_KEYBOARD, HidReportId::NkroKeyboard);
pub static CONSUMER_CONTROL_WITH_ID: [u8; CONSUMER_CONTROL.len() + 2] =
    with_report_id(CONSUMER_CONTROL, HidReportId::ConsumerControl);
pub static SYSTEM_CONTROL_WITH_ID: [u8; SYSTEM_CONTROL.len() + 2] =
    with_report_id(SYSTEM_CONTROL, HidReportId::SystemControl);
pub static MOUSE_WITH_ID: [u8; MOUSE.len() + 2] = with_report_id(MOUSE, HidReportId::Mouse);
pub static ABSOLUTE_MOUSE_WITH_ID: [u8; ABSOLUTE_MOUSE.len() + 2] =
    with_report_id(ABSOLUTE_MOUSE, HidReportId::MouseAbsolute);
pub static GAMEPAD_WITH_ID: [u8; GAMEPAD.len() + 2] =
    with_report_id(GAMEPAD, HidReportId::Gamepad);

/// Descriptor for the report `id`, with or without a Report ID item.
///
/// Returns `None` for report IDs this crate has no device for.
pub fn for_report(id: HidReportId, report_ids: bool) -> Option<&'static [u8]> {
    let descriptor: &'static [u8] = match (id, report_ids) {
        (HidReportId::Keyboard, false) => BOOT_KEYBOARD,
        (HidReportId::Keyboard, true) => &BOOT_KEYBOARD_WITH_ID,
        (HidReportId::NkroKeyboard, false) => NKRO_KEYBOARD,
        (HidReportId::NkroKeyboard, true) => &NKRO_KEYBOARD_WITH_ID,
        (HidReportId::ConsumerControl, false) => CONSUMER_CONTROL,
        (HidReportId::ConsumerControl, true) => &CONSUMER_CONTROL_WITH_ID,
        (HidReportId::SystemControl, false) => SYSTEM_CONTROL,
        (HidReportId::SystemControl, true) => &SYSTEM_CONTROL_WITH_ID,
        (HidReportId::Mouse, false) => MOUSE,
        (HidReportId::Mouse, true) => &MOUSE_WITH_ID,
        (HidReportId::MouseAbsolute, false) => ABSOLUTE_MOUSE,
        (HidReportId::MouseAbsolute, true) => &ABSOLUTE_MOUSE_WITH_ID,
        (HidReportId::Gamepad, false) => GAMEPAD,
        (HidReportId::Gamepad, true) => &GAMEPAD_WITH_ID,
        (HidReportId::None, _) | (HidReportId::RawHid, _) => return None,
    };
    Some(descriptor)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sums `Report Size * Report Count` over the Input main items, in bits.
    fn input_bits(descriptor: &[u8]) -> usize {
        let mut size = 0usize;
        let mut count = 0usize;
        let mut bits = 0usize;
        let mut i = 0;

        while i < descriptor.len() {
            let prefix = descriptor[i];
            let len = match prefix & 0x03 {
                3 => 4,
                n => n as usize,
            };
            let mut value = 0usize;
            for (shift, byte) in descriptor[i + 1..i + 1 + len].iter().enumerate() {
                value |= (*byte as usize) << (8 * shift);
            }
            match prefix & 0xFC {
                0x74 => size = value,
                0x94 => count = value,
                0x80 => bits += size * count,
                _ => {}
            }
            i += 1 + len;
        }
        bits
    }

    #[test]
    fn test_input_report_sizes() {
        assert_eq!(input_bits(BOOT_KEYBOARD), 8 * 8);
        assert_eq!(input_bits(NKRO_KEYBOARD), 29 * 8);
        assert_eq!(input_bits(CONSUMER_CONTROL), 8 * 8);
        assert_eq!(input_bits(SYSTEM_CONTROL), 8);
        assert_eq!(input_bits(MOUSE), 5 * 8);
        assert_eq!(input_bits(ABSOLUTE_MOUSE), 7 * 8);
        assert_eq!(input_bits(GAMEPAD), 15 * 8);
    }

    #[test]
    fn test_report_id_is_inserted_after_collection() {
        assert_eq!(BOOT_KEYBOARD_WITH_ID.len(), BOOT_KEYBOARD.len() + 2);
        assert_eq!(&BOOT_KEYBOARD_WITH_ID[..6], &BOOT_KEYBOARD[..6]);
        assert_eq!(&BOOT_KEYBOARD_WITH_ID[6..8], &[0x85, HidReportId::Keyboard as u8]);
        assert_eq!(&BOOT_KEYBOARD_WITH_ID[8..], &BOOT_KEYBOARD[6..]);

        assert_eq!(GAMEPAD_WITH_ID[7], HidReportId::Gamepad as u8);
        assert_eq!(input_bits(&MOUSE_WITH_ID), input_bits(MOUSE));
    }

    #[test]
    fn test_descriptors_close_their_collections() {
        for descriptor in [
            BOOT_KEYBOARD,
            NKRO_KEYBOARD,
            CONSUMER_CONTROL,
            SYSTEM_CONTROL,
            MOUSE,
            ABSOLUTE_MOUSE,
            GAMEPAD,
        ] {
            assert_eq!(descriptor.last(), Some(&0xC0));
        }
    }

    #[test]
    fn test_for_report() {
        assert_eq!(for_report(HidReportId::Mouse, false), Some(MOUSE));
        assert_eq!(
            for_report(HidReportId::SystemControl, true),
            Some(&SYSTEM_CONTROL_WITH_ID[..])
        );
        assert_eq!(for_report(HidReportId::RawHid, false), None);
    }
}
