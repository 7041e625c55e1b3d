//! Report observer: a hook called after every attempt to send a report.
//!
//! Firmware uses it to mirror reports to a host-side logger or to drive
//! feedback (LEDs, sounds) from what was actually sent. One observer is
//! shared by all devices.

use core::fmt;

use spin::Mutex;

use crate::drivers::usb::HidError;
use crate::report::HidReport;
use crate::HidReportId;

/// Called with the report ID, the report and the outcome of the send.
pub type SendReportHook = fn(id: HidReportId, report: &HidReport, result: &Result<(), HidError>);

fn nop_hook(_id: HidReportId, _report: &HidReport, _result: &Result<(), HidError>) {}

#[derive(Clone, Copy)]
pub struct HidReportObserver {
    send_report_hook: Option<SendReportHook>,
}

impl fmt::Debug for HidReportObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HidReportObserver")
            .field("hooked", &self.send_report_hook.is_some())
            .finish()
    }
}

impl HidReportObserver {
    /// Creates an observer calling `send_report_hook`.
    pub const fn new(send_report_hook: SendReportHook) -> Self {
        Self {
            send_report_hook: Some(send_report_hook),
        }
    }

    /// Creates an observer with a no-op hook.
    pub const fn nop() -> Self {
        Self::new(nop_hook)
    }

    /// Calls the hook, if any.
    pub fn observe_report(&self, id: HidReportId, report: &HidReport, result: &Result<(), HidError>) {
        if let Some(hook) = self.send_report_hook {
            hook(id, report, result);
        }
    }

    /// The installed hook.
    pub fn hook(&self) -> Option<SendReportHook> {
        self.send_report_hook
    }

    /// Replaces the hook.
    pub fn set_hook(&mut self, new_hook: SendReportHook) {
        self.send_report_hook = Some(new_hook);
    }
}

impl Default for HidReportObserver {
    fn default() -> Self {
        Self::nop()
    }
}

static OBSERVER: Mutex<HidReportObserver> = Mutex::new(HidReportObserver::nop());

/// Installs `hook` as the global send-report hook and returns the old one.
pub fn set_hook(hook: SendReportHook) -> Option<SendReportHook> {
    let mut observer = OBSERVER.lock();
    let previous = observer.hook();
    observer.set_hook(hook);
    previous
}

/// The current global send-report hook.
pub fn hook() -> Option<SendReportHook> {
    OBSERVER.lock().hook()
}

/// Restores the no-op hook.
pub fn reset_hook() {
    *OBSERVER.lock() = HidReportObserver::nop();
}

/// Notifies the global observer. The lock is released before the hook runs,
/// so a hook may install another hook.
pub fn observe(id: HidReportId, report: &HidReport, result: &Result<(), HidError>) {
    let observer = *OBSERVER.lock();
    observer.observe_report(id, report, result);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::system_control::SystemControlReport;
    use core::sync::atomic::{AtomicU8, Ordering};

    static LAST_KEY: AtomicU8 = AtomicU8::new(0);

    fn record_key(_id: HidReportId, report: &HidReport, result: &Result<(), HidError>) {
        if let (HidReport::SystemControl(report), Ok(())) = (report, result) {
            LAST_KEY.store(report.key, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_local_observer_calls_hook() {
        let mut observer = HidReportObserver::default();
        let report = HidReport::SystemControl(SystemControlReport { key: 0x83 });

        observer.observe_report(HidReportId::SystemControl, &report, &Ok(()));
        assert_eq!(LAST_KEY.load(Ordering::SeqCst), 0);

        observer.set_hook(record_key);
        observer.observe_report(HidReportId::SystemControl, &report, &Err(HidError::WouldBlock));
        assert_eq!(LAST_KEY.load(Ordering::SeqCst), 0);

        observer.observe_report(HidReportId::SystemControl, &report, &Ok(()));
        assert_eq!(LAST_KEY.load(Ordering::SeqCst), 0x83);
        assert!(observer.hook().is_some());
    }
}
