//! Session API clients.

pub mod http;
