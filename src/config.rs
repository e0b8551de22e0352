use heapless::String;
use log::{debug, info};

use crate::constants::{MAX_GPIO, MAX_KEY_LEN, MAX_PASSWORD_LEN, MAX_PATH_LEN, MAX_SSID_LEN, MAX_URL_LEN};
use crate::defaults;
use crate::display::{Rotation, Shade};
use crate::overrides::{self, SdOverrides};
use crate::power::Weekday;

/// Baseline produced at build time: the compiled-in defaults with any
/// cfg.toml overrides already merged in by build.rs.
pub struct BuildConfig {
    // Wi-Fi credentials
    pub wifi_ssid: &'static str,
    pub wifi_password: &'static str,

    // Root endpoint for schedule retrieval
    pub schedule_api_base: &'static str,

    // Room identifier, and its optional independent display-key override.
    // None means the display key follows the room id.
    pub room_id: &'static str,
    pub display_key: Option<&'static str>,

    // Schedule polling interval in seconds
    pub refresh_seconds: u32,

    // Runtime override document location on the SD card
    pub sd_config_path: &'static str,

    // Optional TTF fonts on the SD card root
    pub font_regular_path: &'static str,
    pub font_bold_path: &'static str,

    // Display orientation in degrees
    pub screen_rotation: u16,

    // Grayscale palette for the UI states
    pub available_bg_shade: u8,
    pub occupied_bg_shade: u8,
    pub button_fill_shade: u8,
    pub button_pressed_shade: u8,
    pub text_color_shade: u8,

    // Touch interrupt GPIO used as wake source
    pub touch_int_pin: u8,

    // UI toggles
    pub show_battery: bool,
    pub show_debug_clock: bool,
    pub twentyfour_hour: bool,

    // Verbose logging, errors only when false
    pub debug_logging: bool,

    // Business hours window gating deep sleep
    pub enable_business_hours: bool,
    pub business_hours_start: u8,
    pub business_hours_end: u8,
    pub deep_sleep_weekends: bool,

    // Power rails during sleep
    pub epd_power_off_in_sleep: bool,
    pub extpwr_off_in_sleep: bool,
}

impl BuildConfig {
    /// Baseline with no build-time overrides applied.
    pub const DEFAULT: BuildConfig = BuildConfig {
        wifi_ssid: defaults::WIFI_SSID,
        wifi_password: defaults::WIFI_PASSWORD,
        schedule_api_base: defaults::SCHEDULE_API_BASE,
        room_id: defaults::ROOM_ID,
        display_key: None,
        refresh_seconds: defaults::REFRESH_SECONDS,
        sd_config_path: defaults::SD_CONFIG_PATH,
        font_regular_path: defaults::FONT_REGULAR_PATH,
        font_bold_path: defaults::FONT_BOLD_PATH,
        screen_rotation: defaults::SCREEN_ROTATION,
        available_bg_shade: defaults::AVAILABLE_BG_SHADE,
        occupied_bg_shade: defaults::OCCUPIED_BG_SHADE,
        button_fill_shade: defaults::BUTTON_FILL_SHADE,
        button_pressed_shade: defaults::BUTTON_PRESSED_SHADE,
        text_color_shade: defaults::TEXT_COLOR_SHADE,
        touch_int_pin: defaults::TOUCH_INT_PIN,
        show_battery: defaults::SHOW_BATTERY,
        show_debug_clock: defaults::SHOW_DEBUG_CLOCK,
        twentyfour_hour: defaults::TWENTYFOUR_HOUR,
        debug_logging: defaults::DEBUG_LOGGING,
        enable_business_hours: defaults::ENABLE_BUSINESS_HOURS,
        business_hours_start: defaults::BUSINESS_HOURS_START,
        business_hours_end: defaults::BUSINESS_HOURS_END,
        deep_sleep_weekends: defaults::DEEP_SLEEP_WEEKENDS,
        epd_power_off_in_sleep: defaults::EPD_POWER_OFF_IN_SLEEP,
        extpwr_off_in_sleep: defaults::EXTPWR_OFF_IN_SLEEP,
    };
}

// baseline values are generated at compile time
include!(concat!(env!("OUT_DIR"), "/build_config.rs"));

#[derive(Debug)]
pub enum Error {
    Overrides(overrides::Error),
    InvalidRotation(u16),
    InvalidShade(u8),
    InvalidHour(u8),
    InvalidGpio(u8),
    ZeroRefreshInterval,
    InvertedBusinessHours { start: u8, end: u8 },
    ValueTooLong,
}

/// The resolved configuration surface.
///
/// Constructed once at startup and passed to the consuming subsystems;
/// there are no setters and no interior mutability. Every value has been
/// validated against its domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub wifi_ssid: String<MAX_SSID_LEN>,
    pub wifi_password: String<MAX_PASSWORD_LEN>,
    pub schedule_api_base: String<MAX_URL_LEN>,
    pub room_id: String<MAX_KEY_LEN>,
    pub display_key: String<MAX_KEY_LEN>,
    pub refresh_seconds: u32,
    pub sd_config_path: String<MAX_PATH_LEN>,
    pub font_regular_path: String<MAX_PATH_LEN>,
    pub font_bold_path: String<MAX_PATH_LEN>,
    pub screen_rotation: Rotation,
    pub available_bg_shade: Shade,
    pub occupied_bg_shade: Shade,
    pub button_fill_shade: Shade,
    pub button_pressed_shade: Shade,
    pub text_color_shade: Shade,
    pub touch_int_pin: u8,
    pub show_battery: bool,
    pub show_debug_clock: bool,
    pub twentyfour_hour: bool,
    pub debug_logging: bool,
    pub enable_business_hours: bool,
    pub business_hours_start: u8,
    pub business_hours_end: u8,
    pub deep_sleep_weekends: bool,
    pub epd_power_off_in_sleep: bool,
    pub extpwr_off_in_sleep: bool,
}

impl Config {
    /// Resolve the surface against the generated build-time baseline,
    /// applying the SD override document if the storage layer found one.
    pub fn load(sd_json: Option<&[u8]>) -> Result<Self, Error> {
        let sd = match sd_json {
            Some(bytes) => {
                debug!("parsing SD override document ({} bytes)", bytes.len());
                Some(SdOverrides::from_json(bytes).map_err(Error::Overrides)?)
            }
            None => None,
        };
        Self::resolve(&BUILD_CONFIG, sd.as_ref())
    }

    /// Apply the layering: every parameter the SD document sets wins over
    /// the baseline, everything else falls through. All domains are
    /// validated here, whichever layer the value came from.
    pub fn resolve(base: &BuildConfig, sd: Option<&SdOverrides>) -> Result<Self, Error> {
        let empty = SdOverrides::default();
        let sd = sd.unwrap_or(&empty);

        let refresh_seconds = sd.refresh_seconds.unwrap_or(base.refresh_seconds);
        if refresh_seconds == 0 {
            return Err(Error::ZeroRefreshInterval);
        }

        let degrees = sd.screen_rotation.unwrap_or(base.screen_rotation);
        let screen_rotation = Rotation::from_degrees(degrees).ok_or(Error::InvalidRotation(degrees))?;

        let touch_int_pin = sd.touch_int_pin.unwrap_or(base.touch_int_pin);
        if touch_int_pin > MAX_GPIO {
            return Err(Error::InvalidGpio(touch_int_pin));
        }

        let business_hours_start = hour(sd.business_hours_start, base.business_hours_start)?;
        let business_hours_end = hour(sd.business_hours_end, base.business_hours_end)?;
        let enable_business_hours = sd.enable_business_hours.unwrap_or(base.enable_business_hours);
        if enable_business_hours && business_hours_start >= business_hours_end {
            return Err(Error::InvertedBusinessHours {
                start: business_hours_start,
                end: business_hours_end,
            });
        }

        let room_id: String<MAX_KEY_LEN> = owned(sd.room_id.as_ref(), base.room_id)?;

        // The display key aliases the room id unless some layer set it
        // independently; an explicit value from a later layer wins.
        let display_key = match (sd.display_key.as_ref(), base.display_key) {
            (Some(key), _) => key.clone(),
            (None, Some(key)) => String::try_from(key).map_err(|_| Error::ValueTooLong)?,
            (None, None) => room_id.clone(),
        };

        let config = Config {
            wifi_ssid: owned(sd.wifi_ssid.as_ref(), base.wifi_ssid)?,
            wifi_password: owned(sd.wifi_password.as_ref(), base.wifi_password)?,
            schedule_api_base: owned(sd.schedule_api_base.as_ref(), base.schedule_api_base)?,
            room_id,
            display_key,
            refresh_seconds,
            sd_config_path: owned(None, base.sd_config_path)?,
            font_regular_path: owned(sd.font_regular_path.as_ref(), base.font_regular_path)?,
            font_bold_path: owned(sd.font_bold_path.as_ref(), base.font_bold_path)?,
            screen_rotation,
            available_bg_shade: shade(sd.available_bg_shade, base.available_bg_shade)?,
            occupied_bg_shade: shade(sd.occupied_bg_shade, base.occupied_bg_shade)?,
            button_fill_shade: shade(sd.button_fill_shade, base.button_fill_shade)?,
            button_pressed_shade: shade(sd.button_pressed_shade, base.button_pressed_shade)?,
            text_color_shade: shade(sd.text_color_shade, base.text_color_shade)?,
            touch_int_pin,
            show_battery: sd.show_battery.unwrap_or(base.show_battery),
            show_debug_clock: sd.show_debug_clock.unwrap_or(base.show_debug_clock),
            twentyfour_hour: sd.twentyfour_hour.unwrap_or(base.twentyfour_hour),
            debug_logging: sd.debug_logging.unwrap_or(base.debug_logging),
            enable_business_hours,
            business_hours_start,
            business_hours_end,
            deep_sleep_weekends: sd.deep_sleep_weekends.unwrap_or(base.deep_sleep_weekends),
            epd_power_off_in_sleep: sd.epd_power_off_in_sleep.unwrap_or(base.epd_power_off_in_sleep),
            extpwr_off_in_sleep: sd.extpwr_off_in_sleep.unwrap_or(base.extpwr_off_in_sleep),
        };

        info!(
            "configuration resolved: room '{}', refresh every {}s, rotation {}°",
            config.display_key,
            config.refresh_seconds,
            config.screen_rotation.degrees()
        );

        Ok(config)
    }

    /// Whether the device should be awake at the given local time. The
    /// sleep controller calls this on every wake decision.
    pub fn active_at(&self, day: Weekday, hour: u8) -> bool {
        debug_assert!(hour < 24);

        if !self.enable_business_hours {
            return true;
        }
        if self.deep_sleep_weekends && day.is_weekend() {
            return false;
        }
        self.business_hours_start <= hour && hour < self.business_hours_end
    }

    /// Logger verbosity matching the debug_logging toggle.
    pub fn log_level(&self) -> log::LevelFilter {
        if self.debug_logging {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Error
        }
    }
}

fn owned<const N: usize>(over: Option<&String<N>>, base: &'static str) -> Result<String<N>, Error> {
    match over {
        Some(value) => Ok(value.clone()),
        None => String::try_from(base).map_err(|_| Error::ValueTooLong),
    }
}

fn shade(over: Option<u8>, base: u8) -> Result<Shade, Error> {
    let level = over.unwrap_or(base);
    Shade::new(level).ok_or(Error::InvalidShade(level))
}

fn hour(over: Option<u8>, base: u8) -> Result<u8, Error> {
    let value = over.unwrap_or(base);
    if value > 23 {
        return Err(Error::InvalidHour(value));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stock() -> Config {
        Config::resolve(&BuildConfig::DEFAULT, None).unwrap()
    }

    fn with_json(json: &[u8]) -> Result<Config, Error> {
        let sd = SdOverrides::from_json(json).map_err(Error::Overrides)?;
        Config::resolve(&BuildConfig::DEFAULT, Some(&sd))
    }

    #[test]
    fn no_overrides_yields_documented_defaults() {
        let config = stock();

        assert_eq!(config.wifi_ssid.as_str(), "NETWORK_SSID");
        assert_eq!(config.wifi_password.as_str(), "NETWORK_PASSWORD");
        assert_eq!(config.schedule_api_base.as_str(), "https://api.meetingroom365.com");
        assert_eq!(config.room_id.as_str(), "displaykey");
        assert_eq!(config.display_key.as_str(), "displaykey");
        assert_eq!(config.refresh_seconds, 300);
        assert_eq!(config.sd_config_path.as_str(), "/config.json");
        assert_eq!(config.font_regular_path.as_str(), "/Inter.ttf");
        assert_eq!(config.font_bold_path.as_str(), "/InterBold.ttf");
        assert_eq!(config.screen_rotation, Rotation::Deg90);
        assert_eq!(config.available_bg_shade.level(), 0);
        assert_eq!(config.occupied_bg_shade.level(), 3);
        assert_eq!(config.button_fill_shade.level(), 1);
        assert_eq!(config.button_pressed_shade.level(), 5);
        assert_eq!(config.text_color_shade.level(), 14);
        assert_eq!(config.touch_int_pin, 36);
        assert!(config.show_battery);
        assert!(config.show_debug_clock);
        assert!(config.twentyfour_hour);
        assert!(config.debug_logging);
        assert!(config.enable_business_hours);
        assert_eq!(config.business_hours_start, 8);
        assert_eq!(config.business_hours_end, 19);
        assert!(config.deep_sleep_weekends);
        assert!(config.epd_power_off_in_sleep);
        assert!(!config.extpwr_off_in_sleep);
    }

    #[test]
    fn stock_build_matches_compiled_in_defaults() {
        // The generated baseline only differs when the tree carries a
        // cfg.toml, which the repository does not.
        assert_eq!(Config::load(None).unwrap(), stock());
    }

    #[test]
    fn build_layer_wins_over_defaults() {
        let base = BuildConfig {
            refresh_seconds: 120,
            screen_rotation: 0,
            ..BuildConfig::DEFAULT
        };
        let config = Config::resolve(&base, None).unwrap();
        assert_eq!(config.refresh_seconds, 120);
        assert_eq!(config.screen_rotation, Rotation::Deg0);
    }

    #[test]
    fn sd_layer_wins_over_build_layer() {
        let base = BuildConfig {
            refresh_seconds: 120,
            ..BuildConfig::DEFAULT
        };
        let sd = SdOverrides::from_json(br#"{"refresh_seconds": 600, "show_battery": false}"#).unwrap();
        let config = Config::resolve(&base, Some(&sd)).unwrap();

        assert_eq!(config.refresh_seconds, 600);
        assert!(!config.show_battery);
        // untouched parameters fall through
        assert_eq!(config.business_hours_end, 19);
    }

    #[test]
    fn room_id_override_propagates_to_display_key() {
        let base = BuildConfig {
            room_id: "conf-room-5",
            ..BuildConfig::DEFAULT
        };
        let config = Config::resolve(&base, None).unwrap();
        assert_eq!(config.display_key.as_str(), "conf-room-5");
    }

    #[test]
    fn sd_room_id_override_propagates_to_display_key() {
        let config = with_json(br#"{"room_id": "conf-room-5"}"#).unwrap();
        assert_eq!(config.room_id.as_str(), "conf-room-5");
        assert_eq!(config.display_key.as_str(), "conf-room-5");
    }

    #[test]
    fn independent_display_key_breaks_the_alias() {
        let base = BuildConfig {
            room_id: "conf-room-5",
            display_key: Some("lobby-screen"),
            ..BuildConfig::DEFAULT
        };
        let config = Config::resolve(&base, None).unwrap();
        assert_eq!(config.room_id.as_str(), "conf-room-5");
        assert_eq!(config.display_key.as_str(), "lobby-screen");
    }

    #[test]
    fn build_time_display_key_survives_sd_room_id_override() {
        let base = BuildConfig {
            display_key: Some("lobby-screen"),
            ..BuildConfig::DEFAULT
        };
        let sd = SdOverrides::from_json(br#"{"room_id": "conf-room-5"}"#).unwrap();
        let config = Config::resolve(&base, Some(&sd)).unwrap();
        assert_eq!(config.room_id.as_str(), "conf-room-5");
        assert_eq!(config.display_key.as_str(), "lobby-screen");
    }

    #[test]
    fn start_override_keeps_default_end() {
        let config = with_json(br#"{"business_hours_start": 9}"#).unwrap();

        // active window is [9, 19)
        assert!(!config.active_at(Weekday::Monday, 8));
        assert!(config.active_at(Weekday::Monday, 9));
        assert!(config.active_at(Weekday::Monday, 18));
        assert!(!config.active_at(Weekday::Monday, 19));
    }

    #[test]
    fn weekends_sleep_when_policy_is_on() {
        let config = stock();
        assert!(config.active_at(Weekday::Friday, 10));
        assert!(!config.active_at(Weekday::Saturday, 10));
        assert!(!config.active_at(Weekday::Sunday, 10));
    }

    #[test]
    fn weekends_stay_active_when_policy_is_off() {
        let config = with_json(br#"{"deep_sleep_weekends": false}"#).unwrap();
        assert!(config.active_at(Weekday::Saturday, 10));
        assert!(!config.active_at(Weekday::Saturday, 22));
    }

    #[test]
    fn disabled_business_hours_means_always_active() {
        let config = with_json(br#"{"enable_business_hours": false}"#).unwrap();
        assert!(config.active_at(Weekday::Sunday, 3));
        assert!(config.active_at(Weekday::Wednesday, 23));
    }

    #[test]
    fn rejects_zero_refresh_interval() {
        assert!(matches!(
            with_json(br#"{"refresh_seconds": 0}"#),
            Err(Error::ZeroRefreshInterval)
        ));
    }

    #[test]
    fn rejects_out_of_domain_rotation() {
        assert!(matches!(
            with_json(br#"{"screen_rotation": 45}"#),
            Err(Error::InvalidRotation(45))
        ));
    }

    #[test]
    fn rejects_out_of_palette_shade() {
        assert!(matches!(
            with_json(br#"{"text_color_shade": 16}"#),
            Err(Error::InvalidShade(16))
        ));
    }

    #[test]
    fn rejects_out_of_domain_hour() {
        assert!(matches!(
            with_json(br#"{"business_hours_end": 24}"#),
            Err(Error::InvalidHour(24))
        ));
    }

    #[test]
    fn rejects_unknown_gpio() {
        assert!(matches!(
            with_json(br#"{"touch_int_pin": 40}"#),
            Err(Error::InvalidGpio(40))
        ));
    }

    #[test]
    fn rejects_inverted_window_while_enabled() {
        assert!(matches!(
            with_json(br#"{"business_hours_start": 19, "business_hours_end": 8}"#),
            Err(Error::InvertedBusinessHours { start: 19, end: 8 })
        ));
    }

    #[test]
    fn tolerates_inverted_window_while_disabled() {
        let config = with_json(
            br#"{"enable_business_hours": false, "business_hours_start": 19, "business_hours_end": 8}"#,
        )
        .unwrap();
        assert!(config.active_at(Weekday::Monday, 12));
    }

    #[test]
    fn debug_logging_selects_verbosity() {
        assert_eq!(stock().log_level(), log::LevelFilter::Debug);

        let quiet = with_json(br#"{"debug_logging": false}"#).unwrap();
        assert_eq!(quiet.log_level(), log::LevelFilter::Error);
    }

    #[test]
    fn malformed_sd_document_fails_load() {
        assert!(matches!(
            Config::load(Some(b"not json")),
            Err(Error::Overrides(_))
        ));
    }
}
