#![forbid(unsafe_code)]

//! Scripted scenes that exercise `cmd-history`.
//!
//! A key script drives a [`scene::Scene`] frame by frame through a
//! [`session::Session`]; every undoable change of the scene's target goes
//! through its command history.

pub mod cli;
pub mod config;
pub mod error;
pub mod hud;
pub mod input;
pub mod policy;
pub mod scene;
pub mod session;

pub use cli::{run, run_from_env};
pub use error::{GridError, Result};
