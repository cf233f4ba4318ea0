//! intent-bench - evaluation harness for intent classification oracles
//!
//! Scores how accurately, how fast and how consistently an oracle maps
//! free-text customer intents to one of a fixed catalog of services.
//! Two oracle kinds are supported: a chat-completion model reached through an
//! OpenAI-compatible endpoint, and a local find-service classification API.
//!
//! The pipeline is: [`sample`] loads labelled rows, [`prompt`] builds the
//! instructions, a [`provider::ChatOracle`] or [`provider::ClassificationOracle`]
//! answers, [`parse`] extracts the service id, [`runner`] drives the loop,
//! [`stats`] aggregates, and [`report`] renders.

#![forbid(unsafe_code)]
#![cfg_attr(
    test,
    allow(
        clippy::uninlined_format_args,
        clippy::missing_const_for_fn,
        clippy::float_cmp
    )
)]
#![allow(
    clippy::must_use_candidate,
    clippy::doc_markdown,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod error_hints;
pub mod http;
pub mod parse;
pub mod prompt;
pub mod provider;
pub mod providers;
pub mod report;
pub mod runner;
pub mod sample;
pub mod stats;

pub use error::{Error, Result};
