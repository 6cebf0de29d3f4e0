//! Morse Console - text/Morse translation with audible playback
//!
//! This library exports core modules for the console shell and for testing.

/// Character to Morse symbol table
pub mod code;
/// Configuration management
pub mod config;
/// Playback sequencing and audio output
pub mod playback;
/// Telemetry and crash logging
pub mod telemetry;
/// Text to Morse translation
pub mod translate;
