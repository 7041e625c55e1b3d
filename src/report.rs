//! Input reports and the path every report takes to the host.

use log::{trace, warn};

use crate::drivers::usb::{HidError, ReportSink};
use crate::gamepad::GamepadReport;
use crate::keyboard::boot::BootReport;
use crate::keyboard::consumer::ConsumerReport;
use crate::keyboard::nkro::NkroReport;
use crate::keyboard::system_control::SystemControlReport;
use crate::mouse::{AbsoluteMouseReport, MouseReport};
use crate::observer;
use crate::HidReportId;

/// Length of the largest report body (NKRO), without a report ID.
pub const MAX_REPORT_LEN: usize = NkroReport::LEN;

/// A serialized report body.
pub type ReportBuffer = heapless::Vec<u8, MAX_REPORT_LEN>;

const _: () = {
    assert!(BootReport::LEN <= MAX_REPORT_LEN);
    assert!(ConsumerReport::LEN <= MAX_REPORT_LEN);
    assert!(SystemControlReport::LEN <= MAX_REPORT_LEN);
    assert!(MouseReport::LEN <= MAX_REPORT_LEN);
    assert!(AbsoluteMouseReport::LEN <= MAX_REPORT_LEN);
    assert!(GamepadReport::LEN <= MAX_REPORT_LEN);
};

/// A report a device sends to the host.
pub trait InputReport: Copy + Into<HidReport> {
    const ID: HidReportId;
    const LEN: usize;

    fn serialize(&self) -> ReportBuffer;
}

/// Any report sent by this crate, as handed to the observer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HidReport {
    Keyboard(BootReport),
    NkroKeyboard(NkroReport),
    ConsumerControl(ConsumerReport),
    SystemControl(SystemControlReport),
    Mouse(MouseReport),
    MouseAbsolute(AbsoluteMouseReport),
    Gamepad(GamepadReport),
}

impl HidReport {
    /// Report ID of the wrapped report.
    pub fn id(&self) -> HidReportId {
        match self {
            HidReport::Keyboard(_) => BootReport::ID,
            HidReport::NkroKeyboard(_) => NkroReport::ID,
            HidReport::ConsumerControl(_) => ConsumerReport::ID,
            HidReport::SystemControl(_) => SystemControlReport::ID,
            HidReport::Mouse(_) => MouseReport::ID,
            HidReport::MouseAbsolute(_) => AbsoluteMouseReport::ID,
            HidReport::Gamepad(_) => GamepadReport::ID,
        }
    }

    /// Serialized body of the wrapped report.
    pub fn serialize(&self) -> ReportBuffer {
        match self {
            HidReport::Keyboard(report) => report.serialize(),
            HidReport::NkroKeyboard(report) => report.serialize(),
            HidReport::ConsumerControl(report) => report.serialize(),
            HidReport::SystemControl(report) => report.serialize(),
            HidReport::Mouse(report) => report.serialize(),
            HidReport::MouseAbsolute(report) => report.serialize(),
            HidReport::Gamepad(report) => report.serialize(),
        }
    }
}

macro_rules! impl_into_hid_report {
    ($($report:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$report> for HidReport {
                fn from(report: $report) -> Self {
                    HidReport::$variant(report)
                }
            }
        )*
    };
}

impl_into_hid_report! {
    BootReport => Keyboard,
    NkroReport => NkroKeyboard,
    ConsumerReport => ConsumerControl,
    SystemControlReport => SystemControl,
    MouseReport => Mouse,
    AbsoluteMouseReport => MouseAbsolute,
    GamepadReport => Gamepad,
}

pub(crate) fn buffer_from(bytes: &[u8]) -> ReportBuffer {
    bytes.iter().copied().collect()
}

/// Serializes `report`, hands it to `sink` and tells the observer how it
/// went.
pub(crate) fn send<S, R>(sink: &mut S, report: &R) -> Result<(), HidError>
where
    S: ReportSink + ?Sized,
    R: InputReport,
{
    let bytes = report.serialize();
    let result = sink.send_report(R::ID, &bytes);

    match &result {
        Ok(()) => trace!("{:?} report sent: {:02x?}", R::ID, bytes.as_slice()),
        Err(HidError::WouldBlock) => trace!("{:?} report deferred, endpoint busy", R::ID),
        Err(err) => warn!("{:?} report failed: {}", R::ID, err),
    }

    observer::observe(R::ID, &(*report).into(), &result);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingSink;

    #[test]
    fn test_send_forwards_serialized_report() {
        let mut sink = RecordingSink::new();
        let report = SystemControlReport { key: 0x82 };

        send(&mut sink, &report).unwrap();

        assert_eq!(sink.sent, vec![(HidReportId::SystemControl, vec![0x82])]);
    }

    #[test]
    fn test_send_propagates_sink_errors() {
        let mut sink = RecordingSink::new();
        sink.fail_next(HidError::WouldBlock);

        assert_eq!(send(&mut sink, &SystemControlReport::default()), Err(HidError::WouldBlock));
        assert!(sink.sent.is_empty());
    }

    #[test]
    fn test_hid_report_dispatch() {
        let report: HidReport = ConsumerReport { usages: [0x00CD, 0, 0, 0] }.into();
        assert_eq!(report.id(), HidReportId::ConsumerControl);
        assert_eq!(report.serialize().as_slice(), &[0xCD, 0x00, 0, 0, 0, 0, 0, 0]);
    }
}
