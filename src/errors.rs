//! Error Types
//!
//! This module defines the error types used throughout the engine.
//!
//! # Overview
//!
//! The main error type [`HeartfieldError`] covers all failure modes including:
//! - GPU initialization failures
//! - Glyph-resource fetching and parsing errors
//! - Window/event-loop errors
//!
//! All public APIs return [`Result<T>`], an alias for
//! `std::result::Result<T, HeartfieldError>`.

use thiserror::Error;

/// The main error type for the heartfield engine.
///
/// Each variant provides specific context about what went wrong. Note that
/// glyph-resource failures are *reported* through this type but are never
/// fatal: the scene renders without the letter group when the font cannot be
/// fetched or parsed.
#[derive(Error, Debug)]
pub enum HeartfieldError {
    // ========================================================================
    // GPU & Rendering Errors
    // ========================================================================
    /// Failed to request a compatible GPU adapter.
    #[error("Failed to request WGPU adapter: {0}")]
    AdapterRequestFailed(String),

    /// Failed to create the GPU device.
    #[error("Failed to create WGPU device: {0}")]
    DeviceCreateFailed(#[from] wgpu::RequestDeviceError),

    /// Failed to create the rendering surface for a window.
    #[error("Failed to create surface: {0}")]
    SurfaceCreateFailed(#[from] wgpu::CreateSurfaceError),

    /// Event loop error (winit).
    #[error("Event loop error: {0}")]
    EventLoopError(#[from] winit::error::EventLoopError),

    // ========================================================================
    // Glyph Resource Errors
    // ========================================================================
    /// The font request failed at the transport level.
    #[error("Font fetch error: {0}")]
    FontFetchFailed(String),

    /// The font server answered with a non-success status.
    #[error("Font fetch error: status {status}")]
    FontFetchStatus {
        /// HTTP status code
        status: u16,
    },

    /// The typeface data was syntactically valid JSON but not a usable font.
    #[error("Font parse error: {0}")]
    FontParseFailed(String),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Alias for `Result<T, HeartfieldError>`.
pub type Result<T> = std::result::Result<T, HeartfieldError>;
