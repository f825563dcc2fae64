//! Admission-status inference for the Hong Kong school directory.
//!
//! Schools publish their application periods as free text: dates in several
//! notations, phrases such as "现正接受申请", or recurring "每年9月" notes. The
//! [`admissions`] module classifies that text and decides whether a school is
//! currently open, closing soon, or closed. [`records`] loads school records
//! from JSON or CSV exports so the engine can be run over a whole directory.

pub mod admissions;
pub mod config;
pub mod error;
pub mod records;
pub mod telemetry;
