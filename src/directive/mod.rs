//! Declarative directives attached to page elements.
//!
//! The page-composition layer hands over loosely typed data. It is validated and defaulted once
//! at scan time into the typed specs below and never re-validated per frame.

pub(crate) mod duration;
pub(crate) mod model;
pub(crate) mod start;
