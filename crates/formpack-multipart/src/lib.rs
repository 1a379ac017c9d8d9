//! Multipart transport layer for the formpack site-builder pipeline.
//!
//! A form snapshot mixes plain JSON data with in-memory files the user has
//! selected but not yet uploaded. This crate defines the value tree that can
//! hold both ([`FormValue`]), the ordered part container a submission is
//! packaged into ([`MultipartPayload`]), the `multipart/form-data` wire
//! writer ([`MultipartWriter`]), and the legacy bracket-path flattening
//! codec ([`flatten`]).
//!
//! # Example
//!
//! ```
//! use formpack_multipart::{FileHandle, MultipartPayload, MultipartWriter, Part};
//!
//! let mut payload = MultipartPayload::new();
//! payload.push(Part::file(
//!     "logo",
//!     FileHandle::new("logo.png", "image/png", vec![0x89, 0x50, 0x4e, 0x47]),
//! ));
//! payload.push(Part::text("json_body", r#"{"logo":null}"#));
//!
//! let writer = MultipartWriter::with_boundary("x");
//! let body = writer.write(&payload);
//! assert!(body.starts_with(b"--x\r\n"));
//! assert_eq!(writer.content_type(), "multipart/form-data; boundary=x");
//! ```

mod body;
mod form_value;
mod part;

pub mod flatten;

pub use body::{content_type, generate_boundary, MultipartWriter};
pub use form_value::{FileHandle, FormValue};
pub use part::{MultipartPayload, Part, PartBody};
