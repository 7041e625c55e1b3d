//! Consumer Control (media keys): up to four consumer usages at once.

use log::warn;

use super::KeyboardOps;
use crate::drivers::usb::{HidError, ReportSink};
use crate::keycodes;
use crate::report::{self, InputReport, ReportBuffer};
use crate::usage::is_consumer_control;
use crate::HidReportId;

pub const CONSUMER_KEY_SLOTS: usize = 4;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConsumerReport {
    pub usages: [u16; CONSUMER_KEY_SLOTS],
}

impl ConsumerReport {
    pub const LEN: usize = 2 * CONSUMER_KEY_SLOTS;

    /// The four usages, little endian.
    pub fn to_bytes(&self) -> [u8; Self::LEN] {
        let mut bytes = [0u8; Self::LEN];
        for (chunk, usage) in bytes.chunks_exact_mut(2).zip(self.usages.iter()) {
            chunk.copy_from_slice(&usage.to_le_bytes());
        }
        bytes
    }
}

impl InputReport for ConsumerReport {
    const ID: HidReportId = HidReportId::ConsumerControl;
    const LEN: usize = ConsumerReport::LEN;

    fn serialize(&self) -> ReportBuffer {
        report::buffer_from(&self.to_bytes())
    }
}

#[derive(Debug)]
pub struct ConsumerControl<S> {
    sink: S,
    report: ConsumerReport,
    last_report: ConsumerReport,
}

impl<S: ReportSink> ConsumerControl<S> {
    /// Creates a device with no usage held.
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            report: ConsumerReport::default(),
            last_report: ConsumerReport::default(),
        }
    }

    /// The report being built.
    pub fn report(&self) -> &ConsumerReport {
        &self.report
    }

    /// The last report the host received.
    pub fn last_report(&self) -> &ConsumerReport {
        &self.last_report
    }

    /// The sink reports go to.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Drops the device state and returns the sink.
    pub fn into_sink(self) -> S {
        self.sink
    }
}

impl<S: ReportSink> KeyboardOps for ConsumerControl<S> {
    type Key = u16;

    fn press(&mut self, usage: u16) -> usize {
        if !is_consumer_control(usage) {
            return 0;
        }
        if keycodes::insert_key(&mut self.report.usages, usage) {
            1
        } else {
            warn!("consumer report full, dropping usage {:#06x}", usage);
            0
        }
    }

    fn release(&mut self, usage: u16) -> usize {
        if !is_consumer_control(usage) {
            return 0;
        }
        keycodes::remove_key(&mut self.report.usages, usage);
        1
    }

    fn release_all(&mut self) {
        self.report = ConsumerReport::default();
    }

    fn send_report(&mut self) -> Result<(), HidError> {
        if !self.keycodes_changed() {
            return Ok(());
        }
        let report = self.report;
        report::send(&mut self.sink, &report)?;
        self.last_report = report;
        Ok(())
    }

    fn is_key_pressed(&self, usage: u16) -> bool {
        is_consumer_control(usage) && self.report.usages.contains(&usage)
    }

    fn was_key_pressed(&self, usage: u16) -> bool {
        is_consumer_control(usage) && self.last_report.usages.contains(&usage)
    }

    fn keycodes_changed(&self) -> bool {
        self.report != self.last_report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingSink;
    use crate::usage::consumer::*;

    #[test]
    fn test_report_is_little_endian() {
        let report = ConsumerReport {
            usages: [PLAY_PAUSE, AL_CALCULATOR, 0, 0],
        };
        assert_eq!(report.to_bytes(), [0xCD, 0x00, 0x92, 0x01, 0, 0, 0, 0]);
    }

    #[test]
    fn test_press_and_release() {
        let mut media = ConsumerControl::new(RecordingSink::new());

        assert_eq!(media.press(MUTE), 1);
        assert_eq!(media.press(VOLUME_INCREMENT), 1);
        assert_eq!(media.press(MUTE), 1);
        assert_eq!(media.press(0), 0);
        assert_eq!(media.press(0x0400), 0);
        assert_eq!(media.report().usages, [MUTE, VOLUME_INCREMENT, 0, 0]);

        assert_eq!(media.press(PLAY), 1);
        assert_eq!(media.press(STOP), 1);
        assert_eq!(media.press(EJECT), 0);

        assert_eq!(media.release(MUTE), 1);
        assert_eq!(media.report().usages, [STOP, VOLUME_INCREMENT, PLAY, 0]);
        assert!(!media.is_key_pressed(MUTE));
        assert_eq!(media.release(0x0400), 0);
    }

    #[test]
    fn test_send_on_change() {
        let mut media = ConsumerControl::new(RecordingSink::new());

        assert_eq!(media.write(SCAN_NEXT_TRACK).unwrap(), 1);
        media.send_report().unwrap();

        assert_eq!(
            media.sink().bodies(),
            vec![vec![0xB5, 0x00, 0, 0, 0, 0, 0, 0], vec![0; 8]]
        );
        assert_eq!(media.sink().sent[0].0, HidReportId::ConsumerControl);
        assert!(!media.was_key_pressed(SCAN_NEXT_TRACK));
    }
}
