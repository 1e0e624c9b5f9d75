//! End-to-end tests against a live server on a random port.

mod common;
mod concurrency;
mod init_logging;
mod pipeline;
mod status;
