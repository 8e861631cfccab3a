// src/constants.rs

/// Log code of the boundary sentinel written back after each scan.
/// Hosts reserve this code for "no command"; the tag disambiguates our marker.
pub const SENTINEL_CODE: i64 = 99;

/// Text payload of the boundary sentinel record.
pub const SENTINEL_TAG: &str = "cmdhst";

/// `invoke` marker for records produced by the command palette.
pub const INVOKE_PALETTE: &str = "app_pal";

/// `invoke` marker for records produced by the main menu.
pub const INVOKE_MENU: &str = "menu_main";

/// `invoke` marker for records produced through the programmatic-menu API.
pub const INVOKE_MENU_API: &str = "menu_api";

/// The name of the persisted ledger file (in the config directory).
pub const HISTORY_FILENAME: &str = "cmd_history.txt";

/// The name of the settings file (in the config directory).
pub const SETTINGS_FILENAME: &str = "settings.toml";

/// Line prefix classifying a persisted entry as pinned.
pub const PINNED_PREFIX: &str = "pinned:";

/// Default capacity of the recency-ordered history list.
pub const DEFAULT_HISTORY_SIZE: usize = 24;

/// Key count at which a lookup cache is cleared wholesale and repopulated.
pub const CACHE_CAP: usize = 512;
