//! Report transport: the seam between the report state machines and the
//! USB stack.

pub mod hid;

use core::fmt;

use usb_device::UsbError;

use crate::settings::ProtocolMode;
use crate::HidReportId;

/// Errors raised while moving reports to or from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HidError {
    /// The endpoint is busy; retry on the next poll.
    WouldBlock,
    /// The report does not fit the endpoint or the caller's buffer.
    BufferOverflow,
    /// A report received from the host could not be decoded.
    InvalidReport,
    /// Any other error reported by the USB stack.
    Usb(UsbError),
}

impl From<UsbError> for HidError {
    fn from(err: UsbError) -> Self {
        match err {
            UsbError::WouldBlock => HidError::WouldBlock,
            UsbError::BufferOverflow => HidError::BufferOverflow,
            _ => HidError::Usb(err),
        }
    }
}

impl fmt::Display for HidError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HidError::WouldBlock => write!(f, "Endpoint busy"),
            HidError::BufferOverflow => write!(f, "Report too large"),
            HidError::InvalidReport => write!(f, "Invalid report"),
            HidError::Usb(err) => write!(f, "USB error: {:?}", err),
        }
    }
}

/// Somewhere input reports can be sent to and output reports read from.
///
/// [`hid::UsbHidSink`] is the USB implementation; tests use an in-memory one.
pub trait ReportSink {
    /// Sends one input report. `report` is the serialized report body without
    /// a report ID; the sink adds one if its interface needs it.
    fn send_report(&mut self, id: HidReportId, report: &[u8]) -> Result<(), HidError>;

    /// Reads the latest output report (keyboard LEDs) into `buf`.
    fn read_output(&mut self, _buf: &mut [u8]) -> nb::Result<usize, HidError> {
        Err(nb::Error::WouldBlock)
    }

    /// Protocol mode last set by the host, if the interface supports one.
    fn protocol_mode(&self) -> Option<ProtocolMode> {
        None
    }
}

impl<S: ReportSink + ?Sized> ReportSink for &mut S {
    fn send_report(&mut self, id: HidReportId, report: &[u8]) -> Result<(), HidError> {
        (**self).send_report(id, report)
    }

    fn read_output(&mut self, buf: &mut [u8]) -> nb::Result<usize, HidError> {
        (**self).read_output(buf)
    }

    fn protocol_mode(&self) -> Option<ProtocolMode> {
        (**self).protocol_mode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usb_error_mapping() {
        assert_eq!(HidError::from(UsbError::WouldBlock), HidError::WouldBlock);
        assert_eq!(HidError::from(UsbError::BufferOverflow), HidError::BufferOverflow);
        assert_eq!(
            HidError::from(UsbError::InvalidState),
            HidError::Usb(UsbError::InvalidState)
        );
    }
}
