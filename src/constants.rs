/// Current firmware version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Maximum SSID length (IEEE 802.11)
pub const MAX_SSID_LEN: usize = 32;
/// Maximum Wi-Fi password length (WPA2)
pub const MAX_PASSWORD_LEN: usize = 63;

/// Maximum length of the schedule API base URL
pub const MAX_URL_LEN: usize = 128;
/// Maximum length of the room and display identifiers
pub const MAX_KEY_LEN: usize = 64;
/// Maximum length of an SD card path
pub const MAX_PATH_LEN: usize = 64;

/// Gray levels the e-paper panel can render; shades index into this range
pub const GRAY_LEVELS: u8 = 16;

/// Highest GPIO number on the ESP32
pub const MAX_GPIO: u8 = 39;

/// Buffer size for reading the SD override document
pub const SD_CONFIG_BUFFER_SIZE: usize = 1024;
