//! Use-case services for headless front ends.
//!
//! # Responsibility
//! - Gate input before it reaches the repository.
//! - Shape read models for list/detail presentation.

pub mod note_service;
