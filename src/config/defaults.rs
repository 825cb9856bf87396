//! Values used for keys missing from the config file.

// =============================================================================
// Identity Defaults
// =============================================================================

pub fn default_nick() -> String {
    "slirc".to_string()
}

pub fn default_user() -> String {
    "slirc".to_string()
}

pub fn default_realname() -> String {
    "Straylight IRC Client".to_string()
}

pub fn default_hostname() -> String {
    "localhost".to_string()
}

// =============================================================================
// Client Defaults
// =============================================================================

pub fn default_quit_message() -> String {
    "Quitting!".to_string()
}

pub fn default_connect_timeout_secs() -> u64 {
    10
}

pub fn default_poll_interval_ms() -> u64 {
    10
}

pub fn default_nick_colors() -> bool {
    true
}

// =============================================================================
// File Defaults
// =============================================================================

pub fn default_log_file() -> Option<String> {
    Some("log.txt".to_string())
}

pub fn default_badwords_file() -> Option<String> {
    Some("badwords.txt".to_string())
}

pub fn default_hilites_file() -> Option<String> {
    Some("hilites.txt".to_string())
}

pub fn default_port() -> u16 {
    6667
}
