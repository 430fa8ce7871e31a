//! # Error Types
//!
//! Domain-specific error types for argent-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  argent-core errors (this file)                                     │
//! │  ├── CoreError        - Business rule violations                    │
//! │  └── ValidationError  - Input validation failures                   │
//! │                                                                     │
//! │  argent-db errors (separate crate)                                  │
//! │  └── DbError          - Persistence and orchestration failures      │
//! │                                                                     │
//! │  Flow: ValidationError → CoreError → DbError → caller               │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. `thiserror` derives, not manual impls
//! 2. Context in every message (channel, field, amounts)
//! 3. Errors are enum variants, never bare strings

use thiserror::Error;

use crate::types::Channel;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations raised by the pure core.
///
/// Anything touching the database raises `DbError` in argent-db instead;
/// these variants cover rules the core can decide on its own.
#[derive(Debug, Error)]
pub enum CoreError {
    /// GST requested on a channel whose policy never applies it.
    #[error("GST is not applicable on the {channel} channel")]
    GstNotSupported { channel: Channel },

    /// Silver return attempted on a channel without return tracking.
    ///
    /// Only wholesale sales carry a silver-to-return obligation.
    #[error("silver return is not supported on the {channel} channel")]
    SilverReturnNotSupported { channel: Channel },

    /// Input validation failure (wraps ValidationError).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any business logic runs; a request that fails validation
/// must never reach the ledger store.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Stone weight cannot exceed the gross weight it is carved from.
    #[error("stone weight {stone} exceeds gross weight {gross}")]
    StoneExceedsGross { gross: String, stone: String },

    /// Touch is a purity percentage and cannot exceed 100%.
    #[error("touch must be at most 100%, got {bps} bps")]
    TouchAboveFine { bps: u32 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
