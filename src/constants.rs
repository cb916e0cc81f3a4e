//! Application-wide constants
//!
//! Defaults used when the corresponding environment variable is not set,
//! plus the fixed wire values of the supported judging systems.

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 20;

// =============================================================================
// SCHEDULER DEFAULTS
// =============================================================================

/// Default cron expression for the processing job (every minute, at second 0)
pub const DEFAULT_PROCESS_CRON: &str = "0 * * * * *";

/// Default upper bound on one contest's processing within a tick, in seconds
pub const DEFAULT_CONTEST_TIMEOUT_SECS: u64 = 300;

// =============================================================================
// RETRY DEFAULTS
// =============================================================================

/// Default pause between attempts of a failed judge call, in seconds
pub const DEFAULT_RETRY_INTERVAL_SECS: u64 = 2;

/// Default attempt cap (0 = retry until the judge answers)
pub const DEFAULT_RETRY_MAX_ATTEMPTS: u32 = 0;

// =============================================================================
// JUDGE DEFAULTS
// =============================================================================

/// Default Yandex.Contest public API root
pub const DEFAULT_YANDEX_API_URL: &str = "https://api.contest.yandex.net/api/public/v2/";

/// Default Codeforces API root
pub const DEFAULT_CODEFORCES_API_URL: &str = "https://codeforces.com/api/";

/// Default Yandex page size, large enough to cover a contest in one call
pub const DEFAULT_YANDEX_PAGE_SIZE: u32 = 100_000;

/// Default timeout for a single HTTP request to a judge, in seconds
pub const DEFAULT_JUDGE_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Codeforces wire values
pub mod codeforces {
    /// Status field value of a successful response
    pub const STATUS_OK: &str = "OK";

    /// Participant type of regular contestants
    pub const CONTESTANT: &str = "CONTESTANT";

    /// Verdict reported while a submission is being judged
    pub const TESTING: &str = "TESTING";

    /// Response language requested on every call
    pub const LANG: &str = "ru";

    /// Length of the random prefix of `apiSig`
    pub const NONCE_LENGTH: usize = 6;
}

/// Verdict string every judge uses for an accepted submission
pub const VERDICT_OK: &str = "OK";
