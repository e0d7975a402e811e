//! Account activation and deactivation.

pub mod controller;
pub mod router;
pub mod service;
