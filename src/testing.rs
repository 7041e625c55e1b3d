//! In-memory report sink and USB bus for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use usb_device::bus::{PollResult, UsbBus};
use usb_device::endpoint::{EndpointAddress, EndpointType};
use usb_device::{UsbDirection, UsbError};

use crate::drivers::usb::{HidError, ReportSink};
use crate::settings::ProtocolMode;
use crate::HidReportId;

#[derive(Debug, Default)]
pub struct RecordingSink {
    pub sent: Vec<(HidReportId, Vec<u8>)>,
    pub output: Option<Vec<u8>>,
    pub protocol: Option<ProtocolMode>,
    failure: Option<HidError>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next send fail with `err`.
    pub fn fail_next(&mut self, err: HidError) {
        self.failure = Some(err);
    }

    /// Bodies of the reports sent so far.
    pub fn bodies(&self) -> Vec<Vec<u8>> {
        self.sent.iter().map(|(_, body)| body.clone()).collect()
    }
}

impl ReportSink for RecordingSink {
    fn send_report(&mut self, id: HidReportId, report: &[u8]) -> Result<(), HidError> {
        if let Some(err) = self.failure.take() {
            return Err(err);
        }
        self.sent.push((id, report.to_vec()));
        Ok(())
    }

    fn read_output(&mut self, buf: &mut [u8]) -> nb::Result<usize, HidError> {
        let output = self.output.take().ok_or(nb::Error::WouldBlock)?;
        if output.len() > buf.len() {
            return Err(nb::Error::Other(HidError::BufferOverflow));
        }
        buf[..output.len()].copy_from_slice(&output);
        Ok(output.len())
    }

    fn protocol_mode(&self) -> Option<ProtocolMode> {
        self.protocol
    }
}

/// USB bus that records IN packets and serves queued OUT packets.
///
/// Endpoints only reach the bus once the allocator is frozen, so build a
/// `UsbDevice` after creating the classes under test.
#[derive(Debug, Default)]
pub struct FakeBus {
    next_in: u8,
    next_out: u8,
    written: Mutex<Vec<Vec<u8>>>,
    pending: Mutex<VecDeque<Vec<u8>>>,
}

impl FakeBus {
    /// Packets written to non-control IN endpoints so far.
    pub fn written(&self) -> Vec<Vec<u8>> {
        self.written.lock().unwrap().clone()
    }

    /// Queues an OUT packet from the host.
    pub fn queue_output(&self, packet: &[u8]) {
        self.pending.lock().unwrap().push_back(packet.to_vec());
    }
}

impl UsbBus for FakeBus {
    fn alloc_ep(
        &mut self,
        ep_dir: UsbDirection,
        ep_addr: Option<EndpointAddress>,
        ep_type: EndpointType,
        _max_packet_size: u16,
        _interval: u8,
    ) -> usb_device::Result<EndpointAddress> {
        if let Some(addr) = ep_addr {
            return Ok(addr);
        }
        if ep_type == EndpointType::Control {
            return Ok(EndpointAddress::from_parts(0, ep_dir));
        }
        let next = match ep_dir {
            UsbDirection::In => &mut self.next_in,
            UsbDirection::Out => &mut self.next_out,
        };
        *next += 1;
        Ok(EndpointAddress::from_parts(*next as usize, ep_dir))
    }

    fn enable(&mut self) {}

    fn reset(&self) {}

    fn set_device_address(&self, _addr: u8) {}

    fn write(&self, ep_addr: EndpointAddress, buf: &[u8]) -> usb_device::Result<usize> {
        if ep_addr.index() != 0 {
            self.written.lock().unwrap().push(buf.to_vec());
        }
        Ok(buf.len())
    }

    fn read(&self, ep_addr: EndpointAddress, buf: &mut [u8]) -> usb_device::Result<usize> {
        if ep_addr.index() == 0 {
            return Err(UsbError::WouldBlock);
        }
        let packet = self.pending.lock().unwrap().pop_front().ok_or(UsbError::WouldBlock)?;
        if packet.len() > buf.len() {
            return Err(UsbError::BufferOverflow);
        }
        buf[..packet.len()].copy_from_slice(&packet);
        Ok(packet.len())
    }

    fn set_stalled(&self, _ep_addr: EndpointAddress, _stalled: bool) {}

    fn is_stalled(&self, _ep_addr: EndpointAddress) -> bool {
        false
    }

    fn suspend(&self) {}

    fn resume(&self) {}

    fn poll(&self) -> PollResult {
        PollResult::None
    }
}
