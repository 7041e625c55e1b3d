//! Relative and absolute mice.

use bitflags::bitflags;

use crate::drivers::usb::{HidError, ReportSink};
use crate::report::{self, InputReport, ReportBuffer};
use crate::HidReportId;

/// Largest value an absolute coordinate can take.
pub const ABSOLUTE_MAX: u16 = 0x7FFF;

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct MouseButtons: u8 {
        const LEFT = 1 << 0;
        const RIGHT = 1 << 1;
        const MIDDLE = 1 << 2;
        const PREVIOUS = 1 << 3;
        const NEXT = 1 << 4;
    }
}

/// Relative deltas are limited to -127..=127 by the report descriptor.
fn clamp_delta(value: i32) -> i8 {
    value.clamp(-127, 127) as i8
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MouseReport {
    pub buttons: MouseButtons,
    pub x: i8,
    pub y: i8,
    pub wheel: i8,
    pub pan: i8,
}

impl MouseReport {
    pub const LEN: usize = 5;

    /// Buttons, x, y, wheel, pan.
    pub fn to_bytes(&self) -> [u8; Self::LEN] {
        [
            self.buttons.bits(),
            self.x as u8,
            self.y as u8,
            self.wheel as u8,
            self.pan as u8,
        ]
    }
}

impl InputReport for MouseReport {
    const ID: HidReportId = HidReportId::Mouse;
    const LEN: usize = MouseReport::LEN;

    fn serialize(&self) -> ReportBuffer {
        report::buffer_from(&self.to_bytes())
    }
}

/// Relative mouse. Motion is sent as soon as it is requested; button
/// changes are sent when they happen.
#[derive(Debug)]
pub struct Mouse<S> {
    sink: S,
    buttons: MouseButtons,
    last_buttons: MouseButtons,
}

impl<S: ReportSink> Mouse<S> {
    /// Creates a mouse with no buttons held.
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            buttons: MouseButtons::empty(),
            last_buttons: MouseButtons::empty(),
        }
    }

    /// The sink reports go to.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Drops the pointer state and returns the sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Starts reporting. Nothing to set up.
    pub fn begin(&mut self) {}

    /// Releases every button and tells the host.
    pub fn end(&mut self) -> Result<(), HidError> {
        self.release_all()
    }

    /// Presses and releases `buttons`.
    pub fn click(&mut self, buttons: MouseButtons) -> Result<(), HidError> {
        self.press(buttons)?;
        self.release(buttons)
    }

    /// Holds `buttons` down in addition to those already held.
    pub fn press(&mut self, buttons: MouseButtons) -> Result<(), HidError> {
        self.set_buttons(self.buttons | buttons)
    }

    /// Lets go of `buttons`.
    pub fn release(&mut self, buttons: MouseButtons) -> Result<(), HidError> {
        self.set_buttons(self.buttons - buttons)
    }

    /// Lets go of every button.
    pub fn release_all(&mut self) -> Result<(), HidError> {
        self.set_buttons(MouseButtons::empty())
    }

    /// True if any of `buttons` is held.
    pub fn is_pressed(&self, buttons: MouseButtons) -> bool {
        self.buttons.intersects(buttons)
    }

    /// Buttons currently held.
    pub fn buttons(&self) -> MouseButtons {
        self.buttons
    }

    /// Moves the pointer and scrolls. Each delta is clamped to -127..=127.
    pub fn move_by(&mut self, x: i32, y: i32, wheel: i32, pan: i32) -> Result<(), HidError> {
        self.send(MouseReport {
            buttons: self.buttons,
            x: clamp_delta(x),
            y: clamp_delta(y),
            wheel: clamp_delta(wheel),
            pan: clamp_delta(pan),
        })
    }

    fn set_buttons(&mut self, buttons: MouseButtons) -> Result<(), HidError> {
        self.buttons = buttons;
        if self.buttons == self.last_buttons {
            return Ok(());
        }
        self.send(MouseReport {
            buttons,
            ..MouseReport::default()
        })
    }

    fn send(&mut self, report: MouseReport) -> Result<(), HidError> {
        report::send(&mut self.sink, &report)?;
        self.last_buttons = report.buttons;
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AbsoluteMouseReport {
    pub buttons: MouseButtons,
    pub x: u16,
    pub y: u16,
    pub wheel: i8,
    pub pan: i8,
}

impl AbsoluteMouseReport {
    pub const LEN: usize = 7;

    /// Buttons, x and y little endian, wheel, pan.
    pub fn to_bytes(&self) -> [u8; Self::LEN] {
        let x = self.x.to_le_bytes();
        let y = self.y.to_le_bytes();
        [
            self.buttons.bits(),
            x[0],
            x[1],
            y[0],
            y[1],
            self.wheel as u8,
            self.pan as u8,
        ]
    }
}

impl InputReport for AbsoluteMouseReport {
    const ID: HidReportId = HidReportId::MouseAbsolute;
    const LEN: usize = AbsoluteMouseReport::LEN;

    fn serialize(&self) -> ReportBuffer {
        report::buffer_from(&self.to_bytes())
    }
}

/// Absolute pointer (tablets, touch screens). Coordinates run from 0 to
/// [`ABSOLUTE_MAX`] across the whole screen.
#[derive(Debug)]
pub struct AbsoluteMouse<S> {
    sink: S,
    report: AbsoluteMouseReport,
    last_buttons: MouseButtons,
}

impl<S: ReportSink> AbsoluteMouse<S> {
    /// Creates a pointer at the top left corner.
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            report: AbsoluteMouseReport::default(),
            last_buttons: MouseButtons::empty(),
        }
    }

    /// The sink reports go to.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Drops the pointer state and returns the sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Starts reporting. Nothing to set up.
    pub fn begin(&mut self) {}

    /// Releases every button and tells the host.
    pub fn end(&mut self) -> Result<(), HidError> {
        self.release_all()
    }

    /// Presses and releases `buttons`.
    pub fn click(&mut self, buttons: MouseButtons) -> Result<(), HidError> {
        self.press(buttons)?;
        self.release(buttons)
    }

    /// Holds `buttons` down in addition to those already held.
    pub fn press(&mut self, buttons: MouseButtons) -> Result<(), HidError> {
        self.set_buttons(self.report.buttons | buttons)
    }

    /// Lets go of `buttons`.
    pub fn release(&mut self, buttons: MouseButtons) -> Result<(), HidError> {
        self.set_buttons(self.report.buttons - buttons)
    }

    /// Lets go of every button.
    pub fn release_all(&mut self) -> Result<(), HidError> {
        self.set_buttons(MouseButtons::empty())
    }

    /// True if any of `buttons` is held.
    pub fn is_pressed(&self, buttons: MouseButtons) -> bool {
        self.report.buttons.intersects(buttons)
    }

    /// Current pointer position.
    pub fn position(&self) -> (u16, u16) {
        (self.report.x, self.report.y)
    }

    /// Moves the pointer to `(x, y)`, clamped to [`ABSOLUTE_MAX`], and
    /// scrolls by `wheel`.
    pub fn move_to(&mut self, x: u16, y: u16, wheel: i32) -> Result<(), HidError> {
        self.report.x = x.min(ABSOLUTE_MAX);
        self.report.y = y.min(ABSOLUTE_MAX);
        self.report.wheel = clamp_delta(wheel);
        let result = self.send();
        self.report.wheel = 0;
        result
    }

    fn set_buttons(&mut self, buttons: MouseButtons) -> Result<(), HidError> {
        self.report.buttons = buttons;
        if buttons == self.last_buttons {
            return Ok(());
        }
        self.send()
    }

    fn send(&mut self) -> Result<(), HidError> {
        let report = self.report;
        report::send(&mut self.sink, &report)?;
        self.last_buttons = report.buttons;
        Ok(())
    }
}
