use std::{env, error::Error, fs, path::Path};

use serde::Deserialize;

// Share the compiled-in defaults and capacity bounds with the library.
include!("src/defaults.rs");
include!("src/constants.rs");

/// Build-time overrides from cfg.toml. Every key is optional; unknown keys
/// fail the build so a typo cannot silently leave a default in place.
#[derive(Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    wifi_ssid: Option<String>,
    wifi_password: Option<String>,
    schedule_api_base: Option<String>,
    room_id: Option<String>,
    display_key: Option<String>,
    refresh_seconds: Option<u32>,
    sd_config_path: Option<String>,
    font_regular_path: Option<String>,
    font_bold_path: Option<String>,
    screen_rotation: Option<u16>,
    available_bg_shade: Option<u8>,
    occupied_bg_shade: Option<u8>,
    button_fill_shade: Option<u8>,
    button_pressed_shade: Option<u8>,
    text_color_shade: Option<u8>,
    touch_int_pin: Option<u8>,
    show_battery: Option<bool>,
    show_debug_clock: Option<bool>,
    twentyfour_hour: Option<bool>,
    debug_logging: Option<bool>,
    enable_business_hours: Option<bool>,
    business_hours_start: Option<u8>,
    business_hours_end: Option<u8>,
    deep_sleep_weekends: Option<bool>,
    epd_power_off_in_sleep: Option<bool>,
    extpwr_off_in_sleep: Option<bool>,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Tell Cargo to rerun if toml changes
    println!("cargo:rerun-if-changed=cfg.toml");

    // cfg.toml is optional; without it the baseline is the compiled-in defaults
    let raw: RawConfig = match fs::read_to_string("cfg.toml") {
        Ok(toml_str) => toml::from_str(&toml_str)?,
        Err(_) => RawConfig::default(),
    };

    let wifi_ssid = raw.wifi_ssid.as_deref().unwrap_or(WIFI_SSID);
    let wifi_password = raw.wifi_password.as_deref().unwrap_or(WIFI_PASSWORD);
    let schedule_api_base = raw.schedule_api_base.as_deref().unwrap_or(SCHEDULE_API_BASE);
    let room_id = raw.room_id.as_deref().unwrap_or(ROOM_ID);
    let sd_config_path = raw.sd_config_path.as_deref().unwrap_or(SD_CONFIG_PATH);
    let font_regular_path = raw.font_regular_path.as_deref().unwrap_or(FONT_REGULAR_PATH);
    let font_bold_path = raw.font_bold_path.as_deref().unwrap_or(FONT_BOLD_PATH);

    check_len("wifi_ssid", wifi_ssid, MAX_SSID_LEN)?;
    check_len("wifi_password", wifi_password, MAX_PASSWORD_LEN)?;
    check_len("schedule_api_base", schedule_api_base, MAX_URL_LEN)?;
    check_len("room_id", room_id, MAX_KEY_LEN)?;
    check_len("sd_config_path", sd_config_path, MAX_PATH_LEN)?;
    check_len("font_regular_path", font_regular_path, MAX_PATH_LEN)?;
    check_len("font_bold_path", font_bold_path, MAX_PATH_LEN)?;
    if let Some(key) = raw.display_key.as_deref() {
        check_len("display_key", key, MAX_KEY_LEN)?;
    }

    let refresh_seconds = raw.refresh_seconds.unwrap_or(REFRESH_SECONDS);
    if refresh_seconds == 0 {
        return Err("cfg.toml: refresh_seconds must be positive".into());
    }

    let screen_rotation = raw.screen_rotation.unwrap_or(SCREEN_ROTATION);
    if !matches!(screen_rotation, 0 | 90 | 180 | 270) {
        return Err(
            format!("cfg.toml: screen_rotation must be 0, 90, 180 or 270, got {screen_rotation}")
                .into(),
        );
    }

    let available_bg_shade = raw.available_bg_shade.unwrap_or(AVAILABLE_BG_SHADE);
    let occupied_bg_shade = raw.occupied_bg_shade.unwrap_or(OCCUPIED_BG_SHADE);
    let button_fill_shade = raw.button_fill_shade.unwrap_or(BUTTON_FILL_SHADE);
    let button_pressed_shade = raw.button_pressed_shade.unwrap_or(BUTTON_PRESSED_SHADE);
    let text_color_shade = raw.text_color_shade.unwrap_or(TEXT_COLOR_SHADE);
    for (name, level) in [
        ("available_bg_shade", available_bg_shade),
        ("occupied_bg_shade", occupied_bg_shade),
        ("button_fill_shade", button_fill_shade),
        ("button_pressed_shade", button_pressed_shade),
        ("text_color_shade", text_color_shade),
    ] {
        if level >= GRAY_LEVELS {
            return Err(format!("cfg.toml: {name} must be below {GRAY_LEVELS}, got {level}").into());
        }
    }

    let touch_int_pin = raw.touch_int_pin.unwrap_or(TOUCH_INT_PIN);
    if touch_int_pin > MAX_GPIO {
        return Err(format!("cfg.toml: touch_int_pin {touch_int_pin} is not an ESP32 GPIO").into());
    }

    let business_hours_start = raw.business_hours_start.unwrap_or(BUSINESS_HOURS_START);
    let business_hours_end = raw.business_hours_end.unwrap_or(BUSINESS_HOURS_END);
    for (name, hour) in [
        ("business_hours_start", business_hours_start),
        ("business_hours_end", business_hours_end),
    ] {
        if hour > 23 {
            return Err(format!("cfg.toml: {name} must be an hour 0-23, got {hour}").into());
        }
    }
    let enable_business_hours = raw.enable_business_hours.unwrap_or(ENABLE_BUSINESS_HOURS);
    if enable_business_hours && business_hours_start >= business_hours_end {
        return Err(format!(
            "cfg.toml: business hours window [{business_hours_start}, {business_hours_end}) is empty"
        )
        .into());
    }

    let display_key = match raw.display_key.as_deref() {
        Some(key) => format!("Some({key:?})"),
        None => "None".to_string(),
    };

    // Generate the baseline constant
    let code = format!(
        r#"
        pub const BUILD_CONFIG: BuildConfig = BuildConfig {{
            wifi_ssid: {wifi_ssid:?},
            wifi_password: {wifi_password:?},
            schedule_api_base: {schedule_api_base:?},
            room_id: {room_id:?},
            display_key: {display_key},
            refresh_seconds: {refresh_seconds},
            sd_config_path: {sd_config_path:?},
            font_regular_path: {font_regular_path:?},
            font_bold_path: {font_bold_path:?},
            screen_rotation: {screen_rotation},
            available_bg_shade: {available_bg_shade},
            occupied_bg_shade: {occupied_bg_shade},
            button_fill_shade: {button_fill_shade},
            button_pressed_shade: {button_pressed_shade},
            text_color_shade: {text_color_shade},
            touch_int_pin: {touch_int_pin},
            show_battery: {show_battery},
            show_debug_clock: {show_debug_clock},
            twentyfour_hour: {twentyfour_hour},
            debug_logging: {debug_logging},
            enable_business_hours: {enable_business_hours},
            business_hours_start: {business_hours_start},
            business_hours_end: {business_hours_end},
            deep_sleep_weekends: {deep_sleep_weekends},
            epd_power_off_in_sleep: {epd_power_off_in_sleep},
            extpwr_off_in_sleep: {extpwr_off_in_sleep},
        }};
    "#,
        show_battery = raw.show_battery.unwrap_or(SHOW_BATTERY),
        show_debug_clock = raw.show_debug_clock.unwrap_or(SHOW_DEBUG_CLOCK),
        twentyfour_hour = raw.twentyfour_hour.unwrap_or(TWENTYFOUR_HOUR),
        debug_logging = raw.debug_logging.unwrap_or(DEBUG_LOGGING),
        deep_sleep_weekends = raw.deep_sleep_weekends.unwrap_or(DEEP_SLEEP_WEEKENDS),
        epd_power_off_in_sleep = raw.epd_power_off_in_sleep.unwrap_or(EPD_POWER_OFF_IN_SLEEP),
        extpwr_off_in_sleep = raw.extpwr_off_in_sleep.unwrap_or(EXTPWR_OFF_IN_SLEEP),
    );

    let out_dir = env::var("OUT_DIR")?;
    fs::write(Path::new(&out_dir).join("build_config.rs"), code)?;
    Ok(())
}

fn check_len(name: &str, value: &str, max: usize) -> Result<(), Box<dyn Error>> {
    if value.len() > max {
        return Err(format!("cfg.toml: {name} exceeds {max} bytes").into());
    }
    Ok(())
}
