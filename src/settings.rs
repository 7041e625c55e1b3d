//! Device settings: host polling interval, keyboard locale and the protocol
//! mode devices start in.
//!
//! Defaults come from cargo features so firmware can pick them at build time;
//! the builder methods override them at run time.

use usbd_hid::hid_class::{HidCountryCode, HidProtocolMode};

/// Polling interval used when the `high-performance` feature is enabled.
pub const HIGH_PERFORMANCE_POLL_MS: u8 = 10;
/// Polling interval used when the `balanced` feature is enabled (default).
pub const BALANCED_POLL_MS: u8 = 128;
/// Polling interval used when the `best-effort` feature is enabled.
pub const BEST_EFFORT_POLL_MS: u8 = 255;

/// HID protocol mode negotiated with the host (SET_PROTOCOL).
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProtocolMode {
    Boot = 0,
    Report = 1,
}

impl Default for ProtocolMode {
    /// Devices power up in report protocol (HID 1.11, 7.2.6).
    fn default() -> Self {
        ProtocolMode::Report
    }
}

impl From<HidProtocolMode> for ProtocolMode {
    fn from(mode: HidProtocolMode) -> Self {
        match mode {
            HidProtocolMode::Boot => ProtocolMode::Boot,
            HidProtocolMode::Report => ProtocolMode::Report,
        }
    }
}

impl From<ProtocolMode> for HidProtocolMode {
    fn from(mode: ProtocolMode) -> Self {
        match mode {
            ProtocolMode::Boot => HidProtocolMode::Boot,
            ProtocolMode::Report => HidProtocolMode::Report,
        }
    }
}

/// Polling interval selected by the enabled cargo feature. The fastest
/// enabled feature wins.
pub const fn default_poll_ms() -> u8 {
    if cfg!(feature = "high-performance") {
        HIGH_PERFORMANCE_POLL_MS
    } else if cfg!(feature = "balanced") {
        BALANCED_POLL_MS
    } else if cfg!(feature = "best-effort") {
        BEST_EFFORT_POLL_MS
    } else {
        BALANCED_POLL_MS
    }
}

/// Keyboard country code selected by the enabled locale feature.
pub const fn default_locale() -> HidCountryCode {
    if cfg!(feature = "arabic") {
        HidCountryCode::Arabic
    } else if cfg!(feature = "belgian") {
        HidCountryCode::Belgian
    } else if cfg!(feature = "canadian-bilingual") {
        HidCountryCode::CanadianBilingual
    } else if cfg!(feature = "canadian-french") {
        HidCountryCode::CanadianFrench
    } else if cfg!(feature = "czech") {
        HidCountryCode::CzechRepublic
    } else if cfg!(feature = "danish") {
        HidCountryCode::Danish
    } else if cfg!(feature = "finnish") {
        HidCountryCode::Finnish
    } else if cfg!(feature = "french") {
        HidCountryCode::French
    } else if cfg!(feature = "german") {
        HidCountryCode::German
    } else if cfg!(feature = "greek") {
        HidCountryCode::Greek
    } else if cfg!(feature = "hebrew") {
        HidCountryCode::Hebrew
    } else if cfg!(feature = "hungary") {
        HidCountryCode::Hungary
    } else if cfg!(feature = "international") {
        HidCountryCode::InternationalISO
    } else if cfg!(feature = "italian") {
        HidCountryCode::Italian
    } else if cfg!(feature = "japanese") {
        HidCountryCode::JapanKatakana
    } else if cfg!(feature = "korean") {
        HidCountryCode::Korean
    } else if cfg!(feature = "latin-america") {
        HidCountryCode::LatinAmerica
    } else if cfg!(feature = "netherlands") {
        HidCountryCode::NetherlandsDutch
    } else if cfg!(feature = "norwegian") {
        HidCountryCode::Norwegian
    } else if cfg!(feature = "farsi") {
        HidCountryCode::PersianFarsi
    } else if cfg!(feature = "poland") {
        HidCountryCode::Poland
    } else if cfg!(feature = "portuguese") {
        HidCountryCode::Portuguese
    } else if cfg!(feature = "russia") {
        HidCountryCode::Russia
    } else if cfg!(feature = "slovakia") {
        HidCountryCode::Slovakia
    } else if cfg!(feature = "spanish") {
        HidCountryCode::Spanish
    } else if cfg!(feature = "swedish") {
        HidCountryCode::Swedish
    } else if cfg!(feature = "swiss-french") {
        HidCountryCode::SwissFrench
    } else if cfg!(feature = "swiss-german") {
        HidCountryCode::SwissGerman
    } else if cfg!(feature = "switzerland") {
        HidCountryCode::Switzerland
    } else if cfg!(feature = "taiwan") {
        HidCountryCode::Taiwan
    } else if cfg!(feature = "turkish-q") {
        HidCountryCode::TurkishQ
    } else if cfg!(feature = "uk") {
        HidCountryCode::UK
    } else if cfg!(feature = "us") {
        HidCountryCode::US
    } else if cfg!(feature = "yugoslavia") {
        HidCountryCode::Yugoslavia
    } else if cfg!(feature = "turkish-f") {
        HidCountryCode::TurkishF
    } else {
        HidCountryCode::NotSupported
    }
}

/// Settings shared by every HID interface the firmware exposes.
#[derive(Clone, Copy, Debug)]
pub struct HidSettings {
    /// Interrupt endpoint polling interval in milliseconds.
    pub poll_ms: u8,
    /// Country code reported in the HID class descriptor.
    pub locale: HidCountryCode,
    /// Protocol mode restored after a USB reset.
    pub default_protocol: ProtocolMode,
    /// Prefix every report with its [`HidReportId`](crate::HidReportId).
    pub report_ids: bool,
}

impl HidSettings {
    /// Settings selected by the enabled cargo features.
    pub const fn new() -> Self {
        Self {
            poll_ms: default_poll_ms(),
            locale: default_locale(),
            default_protocol: ProtocolMode::Report,
            report_ids: false,
        }
    }

    /// Overrides the polling interval. Zero is not a valid `bInterval` for
    /// interrupt endpoints and is raised to 1 ms.
    pub const fn with_poll_interval(mut self, poll_ms: u8) -> Self {
        self.poll_ms = if poll_ms == 0 { 1 } else { poll_ms };
        self
    }

    /// Overrides the country code.
    pub const fn with_locale(mut self, locale: HidCountryCode) -> Self {
        self.locale = locale;
        self
    }

    /// Overrides the protocol a boot keyboard starts in.
    pub const fn with_default_protocol(mut self, protocol: ProtocolMode) -> Self {
        self.default_protocol = protocol;
        self
    }

    /// Prefixes reports with their report ID.
    pub const fn with_report_ids(mut self, report_ids: bool) -> Self {
        self.report_ids = report_ids;
        self
    }
}

impl Default for HidSettings {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = HidSettings::default();
        assert_eq!(settings.poll_ms, default_poll_ms());
        assert_eq!(settings.default_protocol, ProtocolMode::Report);
        assert!(!settings.report_ids);
    }

    #[test]
    fn test_builder_overrides() {
        let settings = HidSettings::new()
            .with_poll_interval(0)
            .with_locale(HidCountryCode::German)
            .with_default_protocol(ProtocolMode::Boot)
            .with_report_ids(true);

        assert_eq!(settings.poll_ms, 1);
        assert_eq!(settings.locale as u8, HidCountryCode::German as u8);
        assert_eq!(settings.default_protocol, ProtocolMode::Boot);
        assert!(settings.report_ids);

        assert_eq!(HidSettings::new().with_poll_interval(10).poll_ms, 10);
    }

    #[test]
    fn test_protocol_mode_conversion() {
        assert_eq!(ProtocolMode::from(HidProtocolMode::Boot), ProtocolMode::Boot);
        assert_eq!(
            ProtocolMode::from(HidProtocolMode::from(ProtocolMode::Report)),
            ProtocolMode::Report
        );
    }
}
