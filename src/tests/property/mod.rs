//! Property-based tests using the proptest framework.
//!
//! Property tests verify invariants that should hold for all inputs,
//! rather than testing specific cases.
//!
//! ## Test Modules
//!
//! - `filter_props`: Roster filter engine
//!   - Results are always a subset of the input, in input order
//!   - Every result satisfies every active criterion
//!   - An unconstrained filter is the identity
//!   - Queries differing only in case or diacritics match identically
//!
//! - `pref_props`: Preference store and key codec
//!   - Storage keys round-trip through parse for all valid ids
//!   - Stored levels and grades survive a reopen of the store
//!   - Unknown keys always yield the documented defaults

mod filter_props;
mod pref_props;
