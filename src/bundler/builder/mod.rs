//! Build orchestration and coordination.
//!
//! This module provides the main [`Bundler`] orchestrator that drives an
//! Android project through the build stages to a signed APK.
//!
//! # Overview
//!
//! The bundler:
//! 1. Resolves the tool set and reads `library.lib` ([`ToolSet`])
//! 2. Runs the ten [`Stage`]s in order, tracking a [`BuildState`]
//! 3. Pins the aligned package by checksum and refuses to sign it if it changed
//! 4. Returns a [`BundledArtifact`] for the signed APK
//!
//! # Module Organization
//!
//! - [`checksum`] - SHA256 checksum calculation for artifacts
//! - [`orchestrator`] - Main [`Bundler`] struct and stage dispatch
//! - [`signing`] - Debug signing credential
//! - [`state`] - [`BuildState`] / [`Stage`] state machine
//! - [`tool_detection`] - External tool resolution

pub mod checksum;
mod orchestrator;
pub mod signing;
pub mod state;
pub mod tool_detection;

pub use orchestrator::{BundledArtifact, Bundler};
pub use signing::SigningCredential;
pub use state::{BuildState, Stage};
pub use tool_detection::ToolSet;
