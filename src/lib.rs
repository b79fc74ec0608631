#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::return_self_not_must_use
)]

//! EasyReply: paste an email, get an AI-drafted reply.
//!
//! A thin orchestration layer over a single upstream text-generation call.
//! The library exposes the prompt composer, the provider layer, the HTTP
//! gateway, and the client-side session state contract.

pub mod config;
pub mod error;
pub mod gateway;
pub mod prompt;
pub mod providers;
pub mod session;

pub use config::Config;
