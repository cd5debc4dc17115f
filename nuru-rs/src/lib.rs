//! Nuru front end: an interactive console, a script runner, and a terminal
//! documentation tutor, built around a small reference interpreter.
//!
//! The console and the runner work with any [`pipeline::Pipeline`]; the crate
//! ships [`lang::Nuru`] as the default one.

pub mod catalog;
pub mod cli;
pub mod color;
pub mod config;
pub mod console;
pub mod docs;
pub mod error;
pub mod glyphs;
pub mod lang;
pub mod logging;
pub mod pipeline;
pub mod report;
pub mod runner;
pub mod tutor;

pub use error::{Error, Result};
