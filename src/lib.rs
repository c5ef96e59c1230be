//! Inbot - Indexa Capital performance for Slack
//!
//! This library fetches the performance of an Indexa Capital account and
//! renders it as an ephemeral Slack message, behind a handler an HTTP trigger
//! can call once per request.

pub mod config;
pub mod error;
pub mod handler;
pub mod indexa;
pub mod invocation;
pub mod performance;
pub mod render;
pub mod utils;

pub use handler::{Handler, HttpResponse};
pub use invocation::Invocation;
