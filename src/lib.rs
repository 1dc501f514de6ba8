//! Generates Xcode file breakpoints that trace method calls.
//!
//! Every instrumented method gets a breakpoint on entry that logs its
//! arguments, one per `return` that logs the exit, and one on the closing
//! line for calls that fall off the end. The breakpoints share two lldb
//! convenience variables, seeded by a breakpoint on `main`: an indentation
//! string that tracks call depth and a flag that stops the closing-line
//! breakpoint from logging an exit a `return` already logged.

pub mod breakpoint;
pub mod debugger;
pub mod error;
pub mod instrument;
pub mod source;

pub use error::{Error, Result};

use tracing_subscriber::{fmt, EnvFilter};

/// Log to stderr; stdout carries the breakpoint documents.
///
/// `RUST_LOG` is honoured unless `debug` forces debug level.
pub fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
