// HAL - hal-error
// Module: Error type
//
// Copyright (c) 2025 The Flight HAL Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

use core::fmt;

use crate::codes;

/// Closed set of error categories. Codes are scoped within a category and
/// never reused across categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Physical or emulated device failures (not found, busy, init failed).
    Hardware,
    /// Driver-level failures (incompatible, not loaded, unsupported feature).
    Driver,
    /// Bad or missing configuration supplied by the caller.
    Configuration,
    /// Resource exhaustion or contention (memory, locks, handles).
    Resource,
    /// Platform-level constraints the HAL cannot work around.
    Platform,
    /// Network transport failures.
    Network,
    /// Caller-supplied data failed validation.
    Validation,
    /// Invariant violation inside the HAL itself.
    Internal,
}

/// A category+code error carrying only `'static` data.
///
/// `Error` never owns a heap buffer: `message` and `context` are string
/// slices with `'static` lifetime, so the type can be constructed, copied,
/// and returned on targets with no allocator at all. Two errors compare
/// equal iff their category and code match; messages/context are diagnostic
/// only and not part of equality.
#[derive(Debug, Clone, Copy)]
pub struct Error {
    category: ErrorCategory,
    code: u16,
    message: &'static str,
    context: Option<&'static str>,
}

impl Error {
    /// Construct a new error. Prefer the canonical constructors below; this
    /// is the escape hatch for call sites that need a category/code not yet
    /// covered by one.
    #[must_use]
    pub const fn new(category: ErrorCategory, code: u16, message: &'static str) -> Self {
        Self { category, code, message, context: None }
    }

    /// This error's category.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        self.category
    }

    /// This error's category-scoped code.
    #[must_use]
    pub const fn code(&self) -> u16 {
        self.code
    }

    /// The static message describing this error.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        self.message
    }

    /// Optional static context attached by a wrapper. Never changes
    /// category or code — only adds "where this happened" information.
    #[must_use]
    pub const fn context_str(&self) -> Option<&'static str> {
        self.context
    }

    /// Return a copy of this error with `context` attached, without
    /// touching category, code, or message. Wrappers use this to annotate a
    /// propagated error without masking its original identity.
    #[must_use]
    pub const fn with_context(mut self, context: &'static str) -> Self {
        self.context = Some(context);
        self
    }

    // --- Canonical constructors (category, code-space, message) ---

    /// Hardware: the requested device does not exist on this platform.
    #[must_use]
    pub const fn device_not_found() -> Self {
        Self::new(ErrorCategory::Hardware, codes::DEVICE_NOT_FOUND, "device not found")
    }

    /// Hardware: device/subsystem initialization failed.
    #[must_use]
    pub const fn initialization_failed() -> Self {
        Self::new(ErrorCategory::Hardware, codes::INITIALIZATION_FAILED, "initialization failed")
    }

    /// Hardware: device is busy and cannot accept the operation right now.
    #[must_use]
    pub const fn device_busy() -> Self {
        Self::new(ErrorCategory::Hardware, codes::DEVICE_BUSY, "device busy")
    }

    /// Driver: driver version/ABI is incompatible with this HAL build.
    #[must_use]
    pub const fn driver_incompatible() -> Self {
        Self::new(ErrorCategory::Driver, codes::DRIVER_INCOMPATIBLE, "driver incompatible")
    }

    /// Driver: the requested feature is not supported by this driver.
    #[must_use]
    pub const fn feature_not_supported() -> Self {
        Self::new(ErrorCategory::Driver, codes::FEATURE_NOT_SUPPORTED, "feature not supported")
    }

    /// Driver: no driver is currently loaded for this kind.
    #[must_use]
    pub const fn driver_not_loaded() -> Self {
        Self::new(ErrorCategory::Driver, codes::DRIVER_NOT_LOADED, "driver not loaded")
    }

    /// Configuration: a supplied parameter is invalid.
    #[must_use]
    pub const fn invalid_parameter() -> Self {
        Self::new(ErrorCategory::Configuration, codes::INVALID_PARAMETER, "invalid parameter")
    }

    /// Configuration: required configuration is missing.
    #[must_use]
    pub const fn configuration_missing() -> Self {
        Self::new(
            ErrorCategory::Configuration,
            codes::CONFIGURATION_MISSING,
            "configuration missing",
        )
    }

    /// Configuration: a parameter is outside its valid range.
    #[must_use]
    pub const fn parameter_out_of_range() -> Self {
        Self::new(
            ErrorCategory::Configuration,
            codes::PARAMETER_OUT_OF_RANGE,
            "parameter out of range",
        )
    }

    /// Resource: no memory available to satisfy the request.
    #[must_use]
    pub const fn out_of_memory() -> Self {
        Self::new(ErrorCategory::Resource, codes::OUT_OF_MEMORY, "out of memory")
    }

    /// Resource: a bounded resource (pool, ring, registry slot) is full.
    #[must_use]
    pub const fn resource_exhausted() -> Self {
        Self::new(ErrorCategory::Resource, codes::RESOURCE_EXHAUSTED, "resource exhausted")
    }

    /// Resource: the resource is currently locked by another owner.
    #[must_use]
    pub const fn resource_locked() -> Self {
        Self::new(ErrorCategory::Resource, codes::RESOURCE_LOCKED, "resource locked")
    }

    /// Platform: this platform does not support the requested operation.
    #[must_use]
    pub const fn platform_not_supported() -> Self {
        Self::new(ErrorCategory::Platform, codes::PLATFORM_NOT_SUPPORTED, "platform not supported")
    }

    /// Platform: a platform constraint (memory, thread model) was violated.
    #[must_use]
    pub const fn platform_constraint() -> Self {
        Self::new(ErrorCategory::Platform, codes::PLATFORM_CONSTRAINT, "platform constraint")
    }

    /// Network: a connection attempt failed.
    #[must_use]
    pub const fn connection_failed() -> Self {
        Self::new(ErrorCategory::Network, codes::CONNECTION_FAILED, "connection failed")
    }

    /// Network: a network operation timed out.
    #[must_use]
    pub const fn network_timeout() -> Self {
        Self::new(ErrorCategory::Network, codes::NETWORK_TIMEOUT, "network timeout")
    }

    /// Validation: caller-supplied data failed validation.
    #[must_use]
    pub const fn validation_failed() -> Self {
        Self::new(ErrorCategory::Validation, codes::VALIDATION_FAILED, "validation failed")
    }

    /// Validation: the operation is not valid in the current state.
    #[must_use]
    pub const fn invalid_state() -> Self {
        Self::new(ErrorCategory::Validation, codes::INVALID_STATE, "invalid state")
    }

    /// Internal: an invariant was violated inside the HAL.
    #[must_use]
    pub const fn internal_error() -> Self {
        Self::new(ErrorCategory::Internal, codes::INTERNAL_ERROR, "internal error")
    }

    /// Internal: the operation is not implemented for this build.
    #[must_use]
    pub const fn not_implemented() -> Self {
        Self::new(ErrorCategory::Internal, codes::NOT_IMPLEMENTED, "not implemented")
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}:{}] {}", self.category, self.code, self.message)?;
        if let Some(ctx) = self.context {
            write!(f, " ({ctx})")?;
        }
        Ok(())
    }
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.category == other.category && self.code == other.code
    }
}
impl Eq for Error {}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
