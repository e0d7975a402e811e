//! Daily attendance per student and course.

pub mod controller;
pub mod router;
pub mod service;
