//! Desktop UI for the tallybook ledger application.

mod app;

pub use app::{App, StartupArgs};
