//! MTA DNS Infrastructure Layer
pub mod dns;
pub mod logging;
