//! Access policy: route classes, the decision procedure and route registration.

pub mod access;
pub mod routes;
