//! Core types for the event RSVP service.
//!
//! This crate is shared by rsvp-server and the `rsvp` CLI:
//! - `Rsvp`, `NewRsvp` and `Dietary` for attendee responses
//! - `store` for the storage adapter contract and its file/Firestore backends
//! - `service` for validation, timestamping and newest-first listing
//! - `config` and `event` for server configuration and the static event page

pub mod config;
pub mod error;
pub mod event;
pub mod maps;
pub mod rsvp;
pub mod service;
pub mod store;

pub use error::{RsvpError, RsvpResult};
pub use rsvp::{Dietary, NewRsvp, Rsvp};
pub use service::RsvpService;
pub use store::RsvpStore;
