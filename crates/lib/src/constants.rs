//! # Shared Constants
//!
//! Defaults shared by the library and the `avethics-server` configuration.

/// The default path for the application SQLite database.
pub const DEFAULT_DB_FILE: &str = "db/dtl_data.db";

/// The default file the latest regulation is exported to.
pub const DEFAULT_EXPORT_FILE: &str = "autonomous_vehicle_ethics_guidelines.txt";

/// The default text-generation endpoint.
pub const DEFAULT_GEMINI_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash-latest:generateContent";

pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 1024;

/// How many stored regulations the Regulation Generator page shows.
pub const RECENT_REGULATIONS_LIMIT: u32 = 3;
