//! Course registrations.
//!
//! A registration starts `pending` and ends either `approved` or
//! `rejected`. Enrolling takes a seat and charges the course fee; rejecting
//! gives both back. See [`registrar_db::Store::enroll`].

pub mod controller;
pub mod router;
pub mod service;
