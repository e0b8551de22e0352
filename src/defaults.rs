// Compiled-in default for every configuration parameter. This file is the
// single source of truth for the stock values: the library reads it as a
// module and build.rs include!s it when merging cfg.toml overrides.

/// Wi-Fi network to join
pub const WIFI_SSID: &str = "NETWORK_SSID";
/// Wi-Fi pre-shared key
pub const WIFI_PASSWORD: &str = "NETWORK_PASSWORD";

/// Root endpoint for schedule retrieval
pub const SCHEDULE_API_BASE: &str = "https://api.meetingroom365.com";

/// Identifies this device to the schedule API. The display key aliases this
/// value unless a layer sets it independently.
pub const ROOM_ID: &str = "displaykey";

/// Schedule polling interval in seconds
pub const REFRESH_SECONDS: u32 = 300;

/// Location of the runtime override document on the SD card
pub const SD_CONFIG_PATH: &str = "/config.json";

/// Optional TTF fonts on the SD card root. If the files are absent the
/// renderer falls back to its built-in fonts.
pub const FONT_REGULAR_PATH: &str = "/Inter.ttf";
pub const FONT_BOLD_PATH: &str = "/InterBold.ttf";

/// Display orientation in degrees
pub const SCREEN_ROTATION: u16 = 90;

/// Background while the room is free (pure white)
pub const AVAILABLE_BG_SHADE: u8 = 0;
/// Background while the room is booked (subtle grey)
pub const OCCUPIED_BG_SHADE: u8 = 3;
/// Button fill (very light grey)
pub const BUTTON_FILL_SHADE: u8 = 1;
/// Button fill while pressed (darker grey)
pub const BUTTON_PRESSED_SHADE: u8 = 5;
/// Text (dark)
pub const TEXT_COLOR_SHADE: u8 = 14;

/// GPIO carrying the touch controller interrupt, used as wake source
pub const TOUCH_INT_PIN: u8 = 36;

/// Render the battery indicator
pub const SHOW_BATTERY: bool = true;
/// Render a small HH:MM clock at the top-left
pub const SHOW_DEBUG_CLOCK: bool = true;
/// 24-hour time, or 12-hour with AM/PM when false
pub const TWENTYFOUR_HOUR: bool = true;
/// Verbose logging, or errors only when false
pub const DEBUG_LOGGING: bool = true;

/// Deep sleep outside the configured hours to conserve battery
pub const ENABLE_BUSINESS_HOURS: bool = true;
/// First active hour of the day (24-hour clock)
pub const BUSINESS_HOURS_START: u8 = 8;
/// First inactive hour of the day
pub const BUSINESS_HOURS_END: u8 = 19;
/// Treat Saturday and Sunday as outside business hours
pub const DEEP_SLEEP_WEEKENDS: bool = true;

/// Cut the e-paper power rail while sleeping, re-enable on wake
pub const EPD_POWER_OFF_IN_SLEEP: bool = true;
/// Cut the auxiliary rail while sleeping. Kept on by default so the touch
/// controller stays powered and can wake the device.
pub const EXTPWR_OFF_IN_SLEEP: bool = false;
