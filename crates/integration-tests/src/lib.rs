//! Integration tests for Coastline.
//!
//! The tests in `tests/` exercise the plugin lifecycle and the full HTTP
//! surface of the storefront using the in-memory host collaborators from
//! `coastline-core` and an in-memory session store, so no database or
//! network services are required.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p coastline-integration-tests
//! ```

pub mod support;
