//! Integration test framework for uesim
//!
//! # Components
//!
//! - [`test_fixtures`] - subscriber credentials and a mock network that
//!   issues 5G-AKA challenges
//! - [`test_utils`] - logging setup and hex helpers
//!
//! # Test Categories
//!
//! 1. **Registration encoding** - Registration Request bytes built from a profile
//! 2. **AKA exchange** - challenge, verification and Authentication Response
//! 3. **Security wrapper** - integrity-protected downlink PDUs

pub mod test_fixtures;
pub mod test_utils;

pub use test_fixtures::{protect, test_profile, MockNetwork, TEST_AMF, TEST_K, TEST_OP, TEST_OPC, TEST_RAND, TEST_SQN};
pub use test_utils::{hex_bytes, init_test_logging, TestResult};
