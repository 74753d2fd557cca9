//! Session API protocol types.

pub mod models;
