//! Gleaner Gatekeeper
//!
//! Validates and normalizes candidate records before they reach a dataset.
//!
//! The Gatekeeper provides:
//! - Category and title checks
//! - Fixed-format date parsing (no coercion) and date ordering
//! - Tag normalization (trim, lowercase, dedup in first-seen order)
//! - Sub-event id presence and per-record uniqueness
//!
//! Validation is pure: the same candidate always yields the same record or the
//! same error, and validating an already normalized record is a no-op.
//!
//! # Examples
//!
//! ```
//! use gleaner_domain::CandidateRecord;
//! use gleaner_gatekeeper::{Gatekeeper, ValidationErrorKind};
//!
//! let gatekeeper = Gatekeeper::default_config();
//!
//! let candidate = CandidateRecord {
//!     title: "Hack Week".to_string(),
//!     category: "hackathon".to_string(),
//!     ..Default::default()
//! };
//!
//! let err = gatekeeper.validate(candidate).unwrap_err();
//! assert_eq!(err.kind, ValidationErrorKind::InvalidCategory);
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod validator;

pub use config::ValidationConfig;
pub use error::{ValidationError, ValidationErrorKind};
pub use validator::Gatekeeper;
