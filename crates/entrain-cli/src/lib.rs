//! Entrain CLI library.
//!
//! This crate provides the core functionality for the `entrain` binary:
//! config loading, the ElevenLabs speech client, the voice catalog cache, and
//! the command implementations.

pub mod commands;
pub mod elevenlabs;
pub mod input;
pub mod voice_cache;
