//! USB HID interface backed by `usbd-hid`.

use log::{debug, trace, warn};
use usb_device::bus::{UsbBus, UsbBusAllocator};
use usb_device::UsbError;
use usbd_hid::hid_class::{
    HIDClass, HidClassSettings, HidProtocol, HidProtocolMode, HidSubClass, ProtocolModeConfig,
};

use crate::descriptors;
use crate::drivers::usb::{HidError, ReportSink};
use crate::report::MAX_REPORT_LEN;
use crate::settings::{HidSettings, ProtocolMode};
use crate::HidReportId;

/// Which device an interface carries. Decides the report descriptor, the
/// boot subclass and whether the interface gets an OUT endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterfaceKind {
    /// The only boot-subclass interface. It carries reports only while the
    /// host has it in boot protocol; in report protocol the host reads
    /// keyboard keys from the NKRO interface.
    BootKeyboard,
    NkroKeyboard,
    ConsumerControl,
    SystemControl,
    Mouse,
    AbsoluteMouse,
    Gamepad,
}

impl InterfaceKind {
    /// Report ID of the device on this interface.
    pub fn report_id(self) -> HidReportId {
        match self {
            InterfaceKind::BootKeyboard => HidReportId::Keyboard,
            InterfaceKind::NkroKeyboard => HidReportId::NkroKeyboard,
            InterfaceKind::ConsumerControl => HidReportId::ConsumerControl,
            InterfaceKind::SystemControl => HidReportId::SystemControl,
            InterfaceKind::Mouse => HidReportId::Mouse,
            InterfaceKind::AbsoluteMouse => HidReportId::MouseAbsolute,
            InterfaceKind::Gamepad => HidReportId::Gamepad,
        }
    }

    /// Report descriptor for this interface.
    pub fn descriptor(self, report_ids: bool) -> &'static [u8] {
        match (self, report_ids) {
            (InterfaceKind::BootKeyboard, false) => descriptors::BOOT_KEYBOARD,
            (InterfaceKind::BootKeyboard, true) => &descriptors::BOOT_KEYBOARD_WITH_ID,
            (InterfaceKind::NkroKeyboard, false) => descriptors::NKRO_KEYBOARD,
            (InterfaceKind::NkroKeyboard, true) => &descriptors::NKRO_KEYBOARD_WITH_ID,
            (InterfaceKind::ConsumerControl, false) => descriptors::CONSUMER_CONTROL,
            (InterfaceKind::ConsumerControl, true) => &descriptors::CONSUMER_CONTROL_WITH_ID,
            (InterfaceKind::SystemControl, false) => descriptors::SYSTEM_CONTROL,
            (InterfaceKind::SystemControl, true) => &descriptors::SYSTEM_CONTROL_WITH_ID,
            (InterfaceKind::Mouse, false) => descriptors::MOUSE,
            (InterfaceKind::Mouse, true) => &descriptors::MOUSE_WITH_ID,
            (InterfaceKind::AbsoluteMouse, false) => descriptors::ABSOLUTE_MOUSE,
            (InterfaceKind::AbsoluteMouse, true) => &descriptors::ABSOLUTE_MOUSE_WITH_ID,
            (InterfaceKind::Gamepad, false) => descriptors::GAMEPAD,
            (InterfaceKind::Gamepad, true) => &descriptors::GAMEPAD_WITH_ID,
        }
    }

    /// Keyboards receive the LED output report.
    fn has_output(self) -> bool {
        matches!(self, InterfaceKind::BootKeyboard | InterfaceKind::NkroKeyboard)
    }

    fn class_settings(self, settings: &HidSettings) -> HidClassSettings {
        let (subclass, protocol) = match self {
            InterfaceKind::BootKeyboard => (HidSubClass::Boot, HidProtocol::Keyboard),
            InterfaceKind::NkroKeyboard => (HidSubClass::NoSubClass, HidProtocol::Keyboard),
            _ => (HidSubClass::NoSubClass, HidProtocol::Generic),
        };

        HidClassSettings {
            subclass,
            protocol,
            config: ProtocolModeConfig::DefaultBehavior,
            locale: settings.locale,
        }
    }
}

/// One HID interface on a USB bus.
///
/// Pass [`class_mut`](UsbHidSink::class_mut) to `UsbDevice::poll` so the
/// class can answer control requests.
pub struct UsbHidSink<'a, B: UsbBus> {
    class: HIDClass<'a, B>,
    kind: InterfaceKind,
    report_ids: bool,
}

impl<'a, B: UsbBus> UsbHidSink<'a, B> {
    /// Allocates the interface and its endpoints on `alloc`.
    pub fn new(alloc: &'a UsbBusAllocator<B>, kind: InterfaceKind, settings: &HidSettings) -> Self {
        let descriptor = kind.descriptor(settings.report_ids);
        let class_settings = kind.class_settings(settings);

        let mut class = if kind.has_output() {
            HIDClass::new_with_settings(alloc, descriptor, settings.poll_ms, class_settings)
        } else {
            HIDClass::new_ep_in_with_settings(alloc, descriptor, settings.poll_ms, class_settings)
        };

        if kind == InterfaceKind::BootKeyboard {
            let mode = settings.default_protocol.into();
            if let Err(err) = class.set_protocol_mode(mode, ProtocolModeConfig::DefaultBehavior) {
                warn!("{:?}: cannot set initial protocol: {:?}", kind, err);
            }
        }

        debug!(
            "{:?} interface: {} byte descriptor, poll {} ms, report ids {}",
            kind,
            descriptor.len(),
            settings.poll_ms,
            settings.report_ids
        );

        Self {
            class,
            kind,
            report_ids: settings.report_ids,
        }
    }

    /// Device carried by this interface.
    pub fn kind(&self) -> InterfaceKind {
        self.kind
    }

    /// The underlying `usbd-hid` class.
    pub fn class(&self) -> &HIDClass<'a, B> {
        &self.class
    }

    /// Mutable access to the class, for `UsbDevice::poll`.
    pub fn class_mut(&mut self) -> &mut HIDClass<'a, B> {
        &mut self.class
    }

    /// Gives the class back, dropping the sink.
    pub fn into_class(self) -> HIDClass<'a, B> {
        self.class
    }

    /// Boot keyboard interface with the host in boot protocol. Boot reports
    /// have a fixed layout and never carry a report ID.
    fn in_boot_protocol(&self) -> bool {
        self.kind == InterfaceKind::BootKeyboard
            && matches!(self.class.get_protocol_mode(), Ok(HidProtocolMode::Boot))
    }

    /// Boot keyboard interface with the host in report protocol. `usbd-hid`
    /// refuses input on a boot-subclass interface in this state.
    fn in_report_protocol_boot(&self) -> bool {
        self.kind == InterfaceKind::BootKeyboard
            && matches!(self.class.get_protocol_mode(), Ok(HidProtocolMode::Report))
    }

    fn uses_report_ids(&self) -> bool {
        self.report_ids && !self.in_boot_protocol()
    }
}

impl<B: UsbBus> ReportSink for UsbHidSink<'_, B> {
    fn send_report(&mut self, id: HidReportId, report: &[u8]) -> Result<(), HidError> {
        if self.in_report_protocol_boot() {
            trace!("{:?} report not sent, host is in report protocol", id);
            return Ok(());
        }

        let mut buf = [0u8; MAX_REPORT_LEN + 1];
        let data = if self.uses_report_ids() {
            let len = report.len() + 1;
            if len > buf.len() {
                return Err(HidError::BufferOverflow);
            }
            buf[0] = id as u8;
            buf[1..len].copy_from_slice(report);
            &buf[..len]
        } else {
            report
        };

        let written = self.class.push_raw_input(data)?;
        if written != data.len() {
            return Err(HidError::BufferOverflow);
        }
        Ok(())
    }

    fn read_output(&mut self, buf: &mut [u8]) -> nb::Result<usize, HidError> {
        let len = match self.class.pull_raw_output(buf) {
            Ok(len) => len,
            Err(UsbError::WouldBlock) => return Err(nb::Error::WouldBlock),
            Err(err) => return Err(nb::Error::Other(err.into())),
        };

        if self.uses_report_ids() && len > 0 {
            let id = HidReportId::try_from(buf[0]).map_err(nb::Error::Other)?;
            if id != self.kind.report_id() {
                return Err(nb::Error::Other(HidError::InvalidReport));
            }
            buf.copy_within(1..len, 0);
            return Ok(len - 1);
        }
        Ok(len)
    }

    fn protocol_mode(&self) -> Option<ProtocolMode> {
        self.class.get_protocol_mode().ok().map(ProtocolMode::from)
    }
}

impl<B: UsbBus> core::fmt::Debug for UsbHidSink<'_, B> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("UsbHidSink")
            .field("kind", &self.kind)
            .field("report_ids", &self.report_ids)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeBus;
    use crate::usage::{consumer, keyboard::*};
    use crate::{
        BootKeyboard, ConsumerControl, Keyboard, KeyboardOps, Mouse, MouseButtons, NkroKeyboard,
        SystemControl,
    };
    use usb_device::prelude::{UsbDevice, UsbDeviceBuilder, UsbVidPid};

    fn build(alloc: &UsbBusAllocator<FakeBus>) -> UsbDevice<'_, FakeBus> {
        UsbDeviceBuilder::new(alloc, UsbVidPid(0x1209, 0x2301)).build()
    }

    fn host_sets_protocol<B: UsbBus>(sink: &mut UsbHidSink<'_, B>, mode: HidProtocolMode) {
        sink.class_mut()
            .set_protocol_mode(mode, ProtocolModeConfig::DefaultBehavior)
            .unwrap();
    }

    #[test]
    fn test_interface_kinds() {
        let settings = HidSettings::new();

        assert!(InterfaceKind::BootKeyboard.has_output());
        assert!(InterfaceKind::NkroKeyboard.has_output());
        assert!(!InterfaceKind::Gamepad.has_output());

        let boot = InterfaceKind::BootKeyboard.class_settings(&settings);
        assert_eq!(boot.subclass as u8, HidSubClass::Boot as u8);
        assert_eq!(boot.protocol as u8, HidProtocol::Keyboard as u8);

        let mouse = InterfaceKind::Mouse.class_settings(&settings);
        assert_eq!(mouse.subclass as u8, HidSubClass::NoSubClass as u8);

        let media = InterfaceKind::ConsumerControl.class_settings(&settings);
        assert_eq!(media.subclass as u8, HidSubClass::NoSubClass as u8);
        assert_eq!(media.protocol as u8, HidProtocol::Generic as u8);

        for kind in [
            InterfaceKind::BootKeyboard,
            InterfaceKind::NkroKeyboard,
            InterfaceKind::ConsumerControl,
            InterfaceKind::SystemControl,
            InterfaceKind::Mouse,
            InterfaceKind::AbsoluteMouse,
            InterfaceKind::Gamepad,
        ] {
            assert_eq!(descriptors::for_report(kind.report_id(), false), Some(kind.descriptor(false)));
            assert_eq!(descriptors::for_report(kind.report_id(), true), Some(kind.descriptor(true)));
        }
    }

    #[test]
    fn test_mouse_sends_with_default_settings() {
        let alloc = UsbBusAllocator::new(FakeBus::default());
        let mut mouse = Mouse::new(UsbHidSink::new(&alloc, InterfaceKind::Mouse, &HidSettings::new()));
        let device = build(&alloc);

        assert_eq!(mouse.sink().protocol_mode(), None);
        mouse.press(MouseButtons::LEFT).unwrap();
        mouse.move_by(3, -3, 0, 0).unwrap();

        assert_eq!(device.bus().written(), vec![vec![1, 0, 0, 0, 0], vec![1, 3, 0xFD, 0, 0]]);
    }

    #[test]
    fn test_boot_keyboard_follows_host_protocol() {
        let alloc = UsbBusAllocator::new(FakeBus::default());
        let sink = UsbHidSink::new(&alloc, InterfaceKind::BootKeyboard, &HidSettings::new());
        let mut kb = BootKeyboard::new(sink);
        let device = build(&alloc);

        assert_eq!(kb.sink().protocol_mode(), Some(ProtocolMode::Report));
        kb.press(KEY_A);
        assert_eq!(kb.send_report(), Ok(()));
        assert!(device.bus().written().is_empty());

        host_sets_protocol(kb.sink_mut(), HidProtocolMode::Boot);
        assert!(kb.sync_protocol());
        assert_eq!(kb.sink().protocol_mode(), Some(ProtocolMode::Boot));

        kb.press(KEY_B);
        kb.send_report().unwrap();
        assert_eq!(device.bus().written(), vec![vec![0, 0, KEY_A, KEY_B, 0, 0, 0, 0]]);
    }

    #[test]
    fn test_boot_protocol_reports_carry_no_report_id() {
        let alloc = UsbBusAllocator::new(FakeBus::default());
        let settings = HidSettings::new()
            .with_report_ids(true)
            .with_default_protocol(ProtocolMode::Boot);
        let mut kb = BootKeyboard::with_settings(
            UsbHidSink::new(&alloc, InterfaceKind::BootKeyboard, &settings),
            &settings,
        );
        let mut media = ConsumerControl::new(UsbHidSink::new(&alloc, InterfaceKind::ConsumerControl, &settings));
        let device = build(&alloc);

        kb.press(KEY_A);
        kb.send_report().unwrap();
        media.press(consumer::MUTE);
        media.send_report().unwrap();

        assert_eq!(
            device.bus().written(),
            vec![
                vec![0, 0, KEY_A, 0, 0, 0, 0, 0],
                vec![HidReportId::ConsumerControl as u8, 0xE2, 0, 0, 0, 0, 0, 0, 0],
            ]
        );

        device.bus().queue_output(&[0x02]);
        let mut buf = [0u8; 8];
        assert_eq!(kb.sink_mut().read_output(&mut buf), Ok(1));
        assert_eq!(buf[0], 0x02);
    }

    #[test]
    fn test_send_rejects_oversized_report() {
        let alloc = UsbBusAllocator::new(FakeBus::default());
        let settings = HidSettings::new().with_report_ids(true);
        let mut sink = UsbHidSink::new(&alloc, InterfaceKind::Gamepad, &settings);
        let device = build(&alloc);

        assert_eq!(
            sink.send_report(HidReportId::Gamepad, &[0; MAX_REPORT_LEN + 1]),
            Err(HidError::BufferOverflow)
        );
        assert!(device.bus().written().is_empty());
    }

    #[test]
    fn test_read_output_checks_report_id() {
        let alloc = UsbBusAllocator::new(FakeBus::default());
        let settings = HidSettings::new().with_report_ids(true);
        let mut sink = UsbHidSink::new(&alloc, InterfaceKind::NkroKeyboard, &settings);
        let device = build(&alloc);
        let mut buf = [0u8; 8];

        assert_eq!(sink.read_output(&mut buf), Err(nb::Error::WouldBlock));

        device.bus().queue_output(&[HidReportId::NkroKeyboard as u8, 0x05]);
        assert_eq!(sink.read_output(&mut buf), Ok(1));
        assert_eq!(buf[0], 0x05);

        device.bus().queue_output(&[HidReportId::Keyboard as u8, 0x05]);
        assert_eq!(sink.read_output(&mut buf), Err(nb::Error::Other(HidError::InvalidReport)));

        device.bus().queue_output(&[0x7F, 0x05]);
        assert_eq!(sink.read_output(&mut buf), Err(nb::Error::Other(HidError::InvalidReport)));
    }

    #[test]
    fn test_composite_keyboard_survives_protocol_switches() {
        let alloc = UsbBusAllocator::new(FakeBus::default());
        let settings = HidSettings::new();
        let mut kb = Keyboard::new(
            BootKeyboard::with_settings(UsbHidSink::new(&alloc, InterfaceKind::BootKeyboard, &settings), &settings),
            NkroKeyboard::new(UsbHidSink::new(&alloc, InterfaceKind::NkroKeyboard, &settings)),
            ConsumerControl::new(UsbHidSink::new(&alloc, InterfaceKind::ConsumerControl, &settings)),
            SystemControl::new(UsbHidSink::new(&alloc, InterfaceKind::SystemControl, &settings)),
        );
        let device = build(&alloc);

        let mut nkro_a = vec![0u8; 29];
        nkro_a[1] = 1 << KEY_A;

        kb.press(KEY_A);
        kb.send_report().unwrap();
        assert_eq!(device.bus().written(), vec![nkro_a.clone()]);

        host_sets_protocol(kb.boot_mut().sink_mut(), HidProtocolMode::Boot);
        assert!(kb.sync_protocol());
        kb.send_report().unwrap();

        host_sets_protocol(kb.boot_mut().sink_mut(), HidProtocolMode::Report);
        assert!(kb.sync_protocol());
        assert_eq!(kb.send_report(), Ok(()));
        assert_eq!(kb.send_report(), Ok(()));

        assert_eq!(
            device.bus().written(),
            vec![
                nkro_a.clone(),
                vec![0, 0, KEY_A, 0, 0, 0, 0, 0],
                vec![0; 29],
                nkro_a,
            ]
        );
    }
}
