//! Unified status codes for error classification.
//!
//! Status code format: XX_YYY (5-digit)
//! - XX = Category (00-99)
//! - YYY = Code within category (000-999)
//!
//! Category layout:
//! - General/Core (00-05): Success, Common, Input, IO, Network, Auth
//! - Business (10-15): Config, Policy, Transport, Worker, Child, Resource

use strum::AsRefStr;
use strum::EnumIter;
use strum::FromRepr;

/// Status code metadata.
#[derive(Debug, Clone, Copy)]
pub struct StatusMeta {
    pub retryable: bool,
    pub log_error: bool,
    pub category: StatusCategory,
}

/// Status code category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCategory {
    // ====== General/Core (00-05) ======
    /// Success (00_xxx)
    Success,
    /// Common/internal errors (01_xxx)
    Common,
    /// Parameter/validation errors (02_xxx)
    Input,
    /// IO/storage errors (03_xxx)
    IO,
    /// Network/transport errors (04_xxx)
    Network,
    /// Authentication/authorization errors (05_xxx)
    Auth,

    // ====== Business (10-15) ======
    /// Configuration errors (10_xxx)
    Config,
    /// Scheduling/isolation policy errors (11_xxx)
    Policy,
    /// Worker subprocess transport errors (12_xxx)
    Transport,
    /// Worker execution failures (13_xxx)
    Worker,
    /// Child-feature failures routed through fault isolation (14_xxx)
    Child,
    /// Resource/budget limits (15_xxx)
    Resource,
}

macro_rules! define_status_codes {
    ($(
        $(#[$attr:meta])*
        $name:ident = $value:expr => {
            retryable: $retry:expr,
            log_error: $log:expr,
            category: $cat:ident $(,)?
        }
    ),* $(,)?) => {
        /// Status codes for error classification.
        ///
        /// Format: XX_YYY (5-digit)
        /// - XX = Category (00-99)
        /// - YYY = Code within category (000-999)
        #[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumIter, FromRepr)]
        #[repr(i32)]
        pub enum StatusCode {
            $($(#[$attr])* $name = $value,)*
        }

        impl StatusCode {
            /// Returns the metadata for this status code.
            pub const fn meta(&self) -> StatusMeta {
                match self {
                    $(Self::$name => StatusMeta {
                        retryable: $retry,
                        log_error: $log,
                        category: StatusCategory::$cat,
                    },)*
                }
            }

            /// Returns the string name of this status code.
            pub const fn name(&self) -> &'static str {
                match self {
                    $(Self::$name => stringify!($name),)*
                }
            }
        }

        // Compile-time check for duplicate status code values
        const _: () = {
            const CODES: &[i32] = &[$($value),*];
            const fn check_unique() {
                let mut i = 0;
                while i < CODES.len() {
                    let mut j = i + 1;
                    while j < CODES.len() {
                        if CODES[i] == CODES[j] {
                            panic!("Duplicate status code value detected");
                        }
                        j += 1;
                    }
                    i += 1;
                }
            }
            check_unique();
        };
    };
}

define_status_codes! {
    // ====== Success (00_xxx) ======
    /// Operation succeeded.
    Success = 00_000 => { retryable: false, log_error: false, category: Success },

    // ====== Common errors (01_xxx) ======
    /// Unknown error.
    Unknown = 01_000 => { retryable: false, log_error: true, category: Common },
    /// Internal error, unexpected bug.
    Internal = 01_001 => { retryable: true, log_error: true, category: Common },
    /// Unsupported operation.
    Unsupported = 01_002 => { retryable: false, log_error: false, category: Common },
    /// Task was cancelled.
    Cancelled = 01_003 => { retryable: false, log_error: false, category: Common },

    // ====== Input/Validation errors (02_xxx) ======
    /// Invalid arguments.
    InvalidArguments = 02_000 => { retryable: false, log_error: false, category: Input },
    /// Parse/Deserialize error (malformed stream-event line).
    ParseError = 02_001 => { retryable: false, log_error: false, category: Input },
    /// Invalid JSON.
    InvalidJson = 02_002 => { retryable: false, log_error: false, category: Input },
    /// Spawn request missing a title or otherwise unparsable.
    InvalidSpawnData = 02_003 => { retryable: false, log_error: false, category: Input },
    /// Budget string could not be parsed.
    InvalidBudget = 02_004 => { retryable: false, log_error: false, category: Input },

    // ====== IO/Storage errors (03_xxx) ======
    /// IO error.
    IoError = 03_000 => { retryable: false, log_error: false, category: IO },
    /// File not found.
    FileNotFound = 03_001 => { retryable: false, log_error: false, category: IO },

    // ====== Network/Transport (04_xxx), unused by this crate's domain ======
    /// Network error.
    NetworkError = 04_000 => { retryable: true, log_error: false, category: Network },

    // ====== Auth (05_xxx), unused by this crate's domain ======
    /// Permission denied.
    PermissionDenied = 05_000 => { retryable: false, log_error: false, category: Auth },

    // ====== Config errors (10_xxx) ======
    /// Invalid configuration.
    InvalidConfig = 10_000 => { retryable: false, log_error: false, category: Config },
    /// Config file error.
    ConfigFileError = 10_001 => { retryable: false, log_error: false, category: Config },

    // ====== Policy errors (11_xxx) ======
    /// Feature id not found in the tree.
    FeatureNotFound = 11_000 => { retryable: false, log_error: false, category: Policy },
    /// Parent feature is not in the `running` state.
    ParentNotRunning = 11_001 => { retryable: false, log_error: false, category: Policy },
    /// Spawn would exceed the configured max depth.
    MaxDepthExceeded = 11_002 => { retryable: false, log_error: false, category: Policy },
    /// Context budget exhausted before assembly completed.
    ContextBudgetExhausted = 11_003 => { retryable: false, log_error: false, category: Policy },
    /// Process manager is already at max concurrency.
    MaxConcurrentReached = 11_004 => { retryable: true, log_error: false, category: Policy },
    /// A worker for this feature id is already running.
    AlreadyRunning = 11_005 => { retryable: false, log_error: false, category: Policy },

    // ====== Transport errors (12_xxx) ======
    /// Subprocess failed to start.
    SpawnFailed = 12_000 => { retryable: true, log_error: true, category: Transport },
    /// Pipe/IO error while streaming worker output.
    PipeError = 12_001 => { retryable: true, log_error: true, category: Transport },
    /// Operation requires a worker that isn't currently running.
    WorkerNotRunning = 12_002 => { retryable: false, log_error: false, category: Transport },

    // ====== Worker failures (13_xxx) ======
    /// Worker process exited non-zero.
    WorkerExitFailure = 13_000 => { retryable: true, log_error: true, category: Worker },
    /// Worker emitted an explicit error event.
    WorkerErrorEvent = 13_001 => { retryable: true, log_error: true, category: Worker },
    /// Worker output indicates test/build failures.
    WorkerTestFailure = 13_002 => { retryable: true, log_error: false, category: Worker },

    // ====== Child/fault-isolation errors (14_xxx) ======
    /// A child feature failed and isolation policy routed it for handling.
    ChildFailed = 14_000 => { retryable: false, log_error: false, category: Child },
    /// A child failure aborted its parent under strict isolation.
    ChildAbort = 14_001 => { retryable: false, log_error: true, category: Child },

    // ====== Resource/Budget limits (15_xxx) ======
    /// Token or USD budget exceeded.
    BudgetExceeded = 15_000 => { retryable: false, log_error: false, category: Resource },
    /// Global budget requires operator acknowledgement before continuing.
    BudgetNeedsAcknowledgement = 15_001 => { retryable: false, log_error: false, category: Resource },
}

impl StatusCode {
    /// Returns true if `code` is success.
    pub fn is_success(code: i32) -> bool {
        Self::Success as i32 == code
    }

    /// Returns true if the error is retryable.
    pub const fn is_retryable(&self) -> bool {
        self.meta().retryable
    }

    /// Returns true if the error should be logged.
    pub const fn should_log_error(&self) -> bool {
        self.meta().log_error
    }

    /// Returns the category of this status code.
    pub const fn category(&self) -> StatusCategory {
        self.meta().category
    }

    /// Convert from i32.
    pub fn from_i32(value: i32) -> Option<Self> {
        Self::from_repr(value)
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

#[cfg(test)]
#[path = "status_code.test.rs"]
mod tests;
