//! The global send-report hook. Kept in its own test binary since the hook
//! is process-wide.

mod common;

use std::sync::Mutex;

use common::{Host, HostSink};
use keyboardio_hid::observer;
use keyboardio_hid::usage::keyboard::KEY_Q;
use keyboardio_hid::{
    BootKeyboard, HidError, HidReport, HidReportId, KeyboardOps, Mouse, MouseButtons,
    ReportSink,
};

static SEEN: Mutex<Vec<(HidReportId, Vec<u8>, bool)>> = Mutex::new(Vec::new());

fn record(id: HidReportId, report: &HidReport, result: &Result<(), HidError>) {
    SEEN.lock()
        .unwrap()
        .push((id, report.serialize().to_vec(), result.is_ok()));
}

/// Refuses every report.
#[derive(Debug)]
struct BusySink;

impl ReportSink for BusySink {
    fn send_report(&mut self, _id: HidReportId, _report: &[u8]) -> Result<(), HidError> {
        Err(HidError::WouldBlock)
    }
}

#[test]
fn hook_sees_every_attempt() {
    assert!(observer::set_hook(record).is_some());

    let host = Host::new();
    let mut keyboard = BootKeyboard::new(HostSink::new(&host));
    keyboard.write(KEY_Q).unwrap();

    let mut mouse = Mouse::new(BusySink);
    assert_eq!(mouse.press(MouseButtons::LEFT), Err(HidError::WouldBlock));

    observer::reset_hook();
    keyboard.write(KEY_Q).unwrap();

    let seen = SEEN.lock().unwrap();
    assert_eq!(
        *seen,
        vec![
            (HidReportId::Keyboard, vec![0, 0, KEY_Q, 0, 0, 0, 0, 0], true),
            (HidReportId::Keyboard, vec![0; 8], true),
            (HidReportId::Mouse, vec![1, 0, 0, 0, 0], false),
        ]
    );
    assert_eq!(host.take().len(), 4);
}
