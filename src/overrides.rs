use heapless::String;
use serde::Deserialize;

use crate::constants::{MAX_KEY_LEN, MAX_PASSWORD_LEN, MAX_PATH_LEN, MAX_SSID_LEN, MAX_URL_LEN};

#[derive(Debug)]
pub enum Error {
    Json(serde_json_core::de::Error),
}

/// Runtime override document read from the SD card.
///
/// Every field is optional: a parameter the document omits falls through to
/// the build-time baseline. Unknown keys are rejected so a typo in the file
/// surfaces as an error instead of silently leaving the default in place.
/// The document cannot relocate itself, so there is no `sd_config_path` key.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SdOverrides {
    pub wifi_ssid: Option<String<MAX_SSID_LEN>>,
    pub wifi_password: Option<String<MAX_PASSWORD_LEN>>,
    pub schedule_api_base: Option<String<MAX_URL_LEN>>,
    pub room_id: Option<String<MAX_KEY_LEN>>,
    pub display_key: Option<String<MAX_KEY_LEN>>,
    pub refresh_seconds: Option<u32>,
    pub font_regular_path: Option<String<MAX_PATH_LEN>>,
    pub font_bold_path: Option<String<MAX_PATH_LEN>>,
    pub screen_rotation: Option<u16>,
    pub available_bg_shade: Option<u8>,
    pub occupied_bg_shade: Option<u8>,
    pub button_fill_shade: Option<u8>,
    pub button_pressed_shade: Option<u8>,
    pub text_color_shade: Option<u8>,
    pub touch_int_pin: Option<u8>,
    pub show_battery: Option<bool>,
    pub show_debug_clock: Option<bool>,
    pub twentyfour_hour: Option<bool>,
    pub debug_logging: Option<bool>,
    pub enable_business_hours: Option<bool>,
    pub business_hours_start: Option<u8>,
    pub business_hours_end: Option<u8>,
    pub deep_sleep_weekends: Option<bool>,
    pub epd_power_off_in_sleep: Option<bool>,
    pub extpwr_off_in_sleep: Option<bool>,
}

impl SdOverrides {
    /// Parse the override document. The storage layer hands us the raw file
    /// contents; trailing bytes after the closing brace are ignored.
    pub fn from_json(bytes: &[u8]) -> Result<Self, Error> {
        let (overrides, _) = serde_json_core::de::from_slice(bytes).map_err(Error::Json)?;
        Ok(overrides)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_sets_nothing() {
        let overrides = SdOverrides::from_json(b"{}").unwrap();
        assert_eq!(overrides.wifi_ssid, None);
        assert_eq!(overrides.refresh_seconds, None);
        assert_eq!(overrides.show_battery, None);
    }

    #[test]
    fn parses_mixed_document() {
        let overrides = SdOverrides::from_json(
            br#"{
                "wifi_ssid": "office-iot",
                "room_id": "conf-room-5",
                "refresh_seconds": 600,
                "screen_rotation": 270,
                "show_battery": false,
                "business_hours_start": 9
            }"#,
        )
        .unwrap();

        assert_eq!(overrides.wifi_ssid.as_deref(), Some("office-iot"));
        assert_eq!(overrides.room_id.as_deref(), Some("conf-room-5"));
        assert_eq!(overrides.refresh_seconds, Some(600));
        assert_eq!(overrides.screen_rotation, Some(270));
        assert_eq!(overrides.show_battery, Some(false));
        assert_eq!(overrides.business_hours_start, Some(9));
        assert_eq!(overrides.display_key, None);
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(SdOverrides::from_json(br#"{"refres_seconds": 600}"#).is_err());
    }

    #[test]
    fn rejects_wrong_types() {
        assert!(SdOverrides::from_json(br#"{"refresh_seconds": "600"}"#).is_err());
    }

    #[test]
    fn toggles_are_booleans_not_integers() {
        assert!(SdOverrides::from_json(br#"{"show_battery": 1}"#).is_err());
        assert!(SdOverrides::from_json(br#"{"show_battery": true}"#).is_ok());
    }

    #[test]
    fn rejects_over_capacity_strings() {
        let long_ssid = br#"{"wifi_ssid": "abcdefghijklmnopqrstuvwxyz0123456789"}"#;
        assert!(SdOverrides::from_json(long_ssid).is_err());
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(SdOverrides::from_json(b"{").is_err());
        assert!(SdOverrides::from_json(b"").is_err());
    }
}
