//! Infrastructure layer - byte-stream plumbing built on the domain.
//!
//! This module provides the resumable reader that hides transport failures
//! behind reopen-and-retry, stream wrappers that give plain readers the
//! [`ByteStream`](crate::domain::ByteStream) surface, and the optional
//! `embedded-io` bridges for the adapters.

pub mod streaming;
