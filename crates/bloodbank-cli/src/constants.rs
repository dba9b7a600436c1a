/// Process exit codes.
pub mod exit_codes {
    pub const NOT_FOUND: i32 = 3;
    pub const INVALID_INPUT: i32 = 4;
    pub const INSUFFICIENT_STOCK: i32 = 5;
    pub const STORAGE_FAILED: i32 = 6;
}

/// Number of audit entries `logs` shows when no limit is given.
pub const DEFAULT_LOG_LIMIT: usize = 20;
