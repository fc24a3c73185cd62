//! Cross-module test suites.
//!
//! Unit tests live next to the code they cover; this module holds the
//! property-based suites and end-to-end scenarios that span the loader,
//! catalogs, filter engine and preference store together.

mod property;
