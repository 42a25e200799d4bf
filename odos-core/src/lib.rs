//! Board-agnostic kinematics core for mission trajectories
//!
//! This crate contains all trajectory logic that does not depend on a
//! specific renderer or timing source:
//!
//! - Mission model and normalization
//! - Pose state and start-pose placement
//! - Motion primitives (move, rotate about the trace point) and easing
//! - Duration model
//! - Live runner state machine driven by an abstract frame scheduler
//! - Replay synthesis and playback
//! - Collaborator traits (frame scheduler, renderer)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

#[macro_use]
mod fmt;

pub mod config;
pub mod mission;
pub mod motion;
pub mod replay;
pub mod runner;
pub mod traits;
