/// Path to the file holding the Discogs personal access token
pub const TOKEN_FILE: &str = "./.api_token";

/// Base URL for the Discogs API
pub const API_HOST: &str = "https://api.discogs.com";

/// Application tag appended to the username in the User-Agent header
pub const USER_AGENT_TAG: &str = "discogs_import";

/// Collection folder releases are added to (folder 1 = "Uncategorized")
pub const UNCATEGORIZED_FOLDER_ID: u32 = 1;

/// Remaining-call threshold below which the updater pauses
pub const RATE_LIMIT_FLOOR: i64 = 5;

/// Seconds to pause when the rate budget runs low
pub const RATE_LIMIT_PAUSE_SECS: u64 = 60;

/// Fixed search parameters sent with every query
pub const SEARCH_KIND: &str = "release";
pub const SEARCH_COUNTRY: &str = "US";
