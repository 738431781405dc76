//! Tradeswork - services marketplace core
//!
//! Booking lifecycle for general-service and project-based professionals,
//! scheduling conflict detection, and booking-scoped conversations with
//! content moderation.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
