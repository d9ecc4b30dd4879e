//! Core types for the todovault task-tracking backend.
//!
//! This crate contains the domain model (`Todo` and its request
//! payloads), due-date parsing, sorting, pagination math, the object
//! store trait, and the error types shared between backends. It
//! performs no I/O of its own.

pub mod storage;
pub mod todo;
