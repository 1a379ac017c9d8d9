//! Core submission pipeline for the formpack site builders.
//!
//! A builder form is edited in memory as a [`FormValue`] snapshot: plain
//! JSON data plus in-memory files the user has picked but not yet uploaded.
//! Saving converts that snapshot into a multipart payload — one binary part
//! per pending file, keyed by its path in the form, and one `json_body` part
//! carrying the document with files nulled and repeating groups stamped with
//! `placement_order`. This crate owns that conversion and its inverse:
//!
//! - [`rules`] — which collections are repeating groups and where files live,
//! - [`encoder`] — the snapshot-to-payload transformation,
//! - [`hydrate`] — server document back into an ordered form snapshot,
//! - [`profiles`] — canned rule sets for the biz, linktree, and portfolio
//!   builders.

pub mod encoder;
pub mod hydrate;
pub mod profiles;
pub mod rules;

pub use encoder::{encode_submission, ConfigurationError, JSON_BODY_PART, PLACEMENT_ORDER_FIELD};
pub use hydrate::hydrate;
pub use rules::{ExtractionRules, GroupRule};

pub use formpack_multipart::{FileHandle, FormValue, MultipartPayload, Part, PartBody};
