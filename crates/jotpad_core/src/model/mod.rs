//! Domain model for notes.
//!
//! # Responsibility
//! - Define the canonical note record shared by repository, service and CLI.
//!
//! # Invariants
//! - Every note is identified by a stable `NoteId` that is never reassigned.

pub mod note;
