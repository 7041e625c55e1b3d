//! 32-button gamepad with six axes and two D-pads.

use crate::drivers::usb::{HidError, ReportSink};
use crate::report::{self, InputReport, ReportBuffer};
use crate::HidReportId;

pub const GAMEPAD_BUTTONS: u8 = 32;

/// Hat switch position. `Centered` is the null state; the others run
/// clockwise from up.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DpadDirection {
    #[default]
    Centered = 0,
    Up = 1,
    UpRight = 2,
    Right = 3,
    DownRight = 4,
    Down = 5,
    DownLeft = 6,
    Left = 7,
    UpLeft = 8,
}

impl DpadDirection {
    /// Direction from the four switches of a digital D-pad. Opposite
    /// switches cancel out.
    pub const fn from_switches(up: bool, down: bool, left: bool, right: bool) -> Self {
        let vertical = (up as i8) - (down as i8);
        let horizontal = (right as i8) - (left as i8);
        match (vertical, horizontal) {
            (1, 0) => DpadDirection::Up,
            (1, 1) => DpadDirection::UpRight,
            (0, 1) => DpadDirection::Right,
            (-1, 1) => DpadDirection::DownRight,
            (-1, 0) => DpadDirection::Down,
            (-1, -1) => DpadDirection::DownLeft,
            (0, -1) => DpadDirection::Left,
            (1, -1) => DpadDirection::UpLeft,
            _ => DpadDirection::Centered,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GamepadReport {
    pub buttons: u32,
    pub x_axis: i16,
    pub y_axis: i16,
    pub z_axis: i8,
    pub rx_axis: i16,
    pub ry_axis: i16,
    pub rz_axis: i8,
    pub dpad1: DpadDirection,
    pub dpad2: DpadDirection,
}

impl GamepadReport {
    pub const LEN: usize = 15;

    /// Buttons, the six axes little endian, then both D-pads in one byte.
    pub fn to_bytes(&self) -> [u8; Self::LEN] {
        let mut bytes = [0u8; Self::LEN];
        bytes[0..4].copy_from_slice(&self.buttons.to_le_bytes());
        bytes[4..6].copy_from_slice(&self.x_axis.to_le_bytes());
        bytes[6..8].copy_from_slice(&self.y_axis.to_le_bytes());
        bytes[8] = self.z_axis as u8;
        bytes[9..11].copy_from_slice(&self.rx_axis.to_le_bytes());
        bytes[11..13].copy_from_slice(&self.ry_axis.to_le_bytes());
        bytes[13] = self.rz_axis as u8;
        bytes[14] = (self.dpad1 as u8) | ((self.dpad2 as u8) << 4);
        bytes
    }
}

impl InputReport for GamepadReport {
    const ID: HidReportId = HidReportId::Gamepad;
    const LEN: usize = GamepadReport::LEN;

    fn serialize(&self) -> ReportBuffer {
        report::buffer_from(&self.to_bytes())
    }
}

/// Bit for 1-based button number `button`, if it exists.
const fn button_bit(button: u8) -> Option<u32> {
    if button >= 1 && button <= GAMEPAD_BUTTONS {
        Some(1 << (button - 1))
    } else {
        None
    }
}

/// Gamepad. Setters only change the report being built; call
/// [`send_report`](Gamepad::send_report) once per scan.
#[derive(Debug)]
pub struct Gamepad<S> {
    sink: S,
    report: GamepadReport,
    last_report: GamepadReport,
}

impl<S: ReportSink> Gamepad<S> {
    /// Creates a centred gamepad with no buttons held.
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            report: GamepadReport::default(),
            last_report: GamepadReport::default(),
        }
    }

    /// The report being built.
    pub fn report(&self) -> &GamepadReport {
        &self.report
    }

    /// The sink reports go to.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Drops the gamepad state and returns the sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Centres everything, releases all buttons and tells the host.
    pub fn end(&mut self) -> Result<(), HidError> {
        self.release_all();
        self.send_report()
    }

    /// Presses button `button` (1..=32). Returns 0 for buttons out of range.
    pub fn press(&mut self, button: u8) -> usize {
        match button_bit(button) {
            Some(bit) => {
                self.report.buttons |= bit;
                1
            }
            None => 0,
        }
    }

    /// Releases button `button`. Returns 0 for buttons out of range.
    pub fn release(&mut self, button: u8) -> usize {
        match button_bit(button) {
            Some(bit) => {
                self.report.buttons &= !bit;
                1
            }
            None => 0,
        }
    }

    /// Whether button `button` is held.
    pub fn is_pressed(&self, button: u8) -> bool {
        button_bit(button).map_or(false, |bit| self.report.buttons & bit != 0)
    }

    /// Releases all buttons and centres every axis and D-pad.
    pub fn release_all(&mut self) {
        self.report = GamepadReport::default();
    }

    /// Sets all 32 buttons at once, button 1 in bit 0.
    pub fn set_buttons(&mut self, buttons: u32) {
        self.report.buttons = buttons;
    }

    /// Left stick X.
    pub fn set_x_axis(&mut self, value: i16) {
        self.report.x_axis = value;
    }

    /// Left stick Y.
    pub fn set_y_axis(&mut self, value: i16) {
        self.report.y_axis = value;
    }

    /// Left trigger.
    pub fn set_z_axis(&mut self, value: i8) {
        self.report.z_axis = value;
    }

    /// Right stick X.
    pub fn set_rx_axis(&mut self, value: i16) {
        self.report.rx_axis = value;
    }

    /// Right stick Y.
    pub fn set_ry_axis(&mut self, value: i16) {
        self.report.ry_axis = value;
    }

    /// Right trigger.
    pub fn set_rz_axis(&mut self, value: i8) {
        self.report.rz_axis = value;
    }

    /// First hat switch.
    pub fn set_dpad1(&mut self, direction: DpadDirection) {
        self.report.dpad1 = direction;
    }

    /// Second hat switch.
    pub fn set_dpad2(&mut self, direction: DpadDirection) {
        self.report.dpad2 = direction;
    }

    /// Sends the report if it changed since the last one the host received.
    pub fn send_report(&mut self) -> Result<(), HidError> {
        if self.report == self.last_report {
            return Ok(());
        }
        self.write()
    }

    /// Sends the report unconditionally.
    pub fn write(&mut self) -> Result<(), HidError> {
        let report = self.report;
        report::send(&mut self.sink, &report)?;
        self.last_report = report;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingSink;

    #[test]
    fn test_report_layout() {
        let report = GamepadReport {
            buttons: 0x8000_0001,
            x_axis: -32768,
            y_axis: 32767,
            z_axis: -1,
            rx_axis: 0x0102,
            ry_axis: -2,
            rz_axis: 127,
            dpad1: DpadDirection::Right,
            dpad2: DpadDirection::UpLeft,
        };
        assert_eq!(
            report.to_bytes(),
            [
                0x01, 0x00, 0x00, 0x80, // buttons
                0x00, 0x80, // x
                0xFF, 0x7F, // y
                0xFF, // z
                0x02, 0x01, // rx
                0xFE, 0xFF, // ry
                0x7F, // rz
                0x83, // dpads
            ]
        );
    }

    #[test]
    fn test_buttons() {
        let mut pad = Gamepad::new(RecordingSink::new());

        assert_eq!(pad.press(1), 1);
        assert_eq!(pad.press(32), 1);
        assert_eq!(pad.press(0), 0);
        assert_eq!(pad.press(33), 0);
        assert!(pad.is_pressed(32));
        assert_eq!(pad.report().buttons, 0x8000_0001);

        assert_eq!(pad.release(1), 1);
        assert!(!pad.is_pressed(1));
        assert!(!pad.is_pressed(40));
    }

    #[test]
    fn test_send_report_on_change() {
        let mut pad = Gamepad::new(RecordingSink::new());

        pad.send_report().unwrap();
        assert!(pad.sink().sent.is_empty());

        pad.set_x_axis(100);
        pad.set_dpad1(DpadDirection::Down);
        pad.send_report().unwrap();
        pad.send_report().unwrap();
        assert_eq!(pad.sink().sent.len(), 1);
        assert_eq!(pad.sink().sent[0].0, HidReportId::Gamepad);

        pad.write().unwrap();
        assert_eq!(pad.sink().sent.len(), 2);

        pad.end().unwrap();
        assert_eq!(pad.sink().bodies().last(), Some(&vec![0; 15]));
    }

    #[test]
    fn test_dpad_from_switches() {
        assert_eq!(DpadDirection::from_switches(false, false, false, false), DpadDirection::Centered);
        assert_eq!(DpadDirection::from_switches(true, false, false, true), DpadDirection::UpRight);
        assert_eq!(DpadDirection::from_switches(false, true, true, false), DpadDirection::DownLeft);
        assert_eq!(DpadDirection::from_switches(true, true, false, true), DpadDirection::Right);
        assert_eq!(DpadDirection::from_switches(true, true, true, true), DpadDirection::Centered);
    }
}
