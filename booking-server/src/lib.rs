//! Railway reservation server.
//!
//! A web application that lists trains between two stations on a date,
//! shows per-class seat availability, and records bookings.

pub mod config;
pub mod domain;
pub mod service;
pub mod store;
pub mod web;
