//! Record builder tests.

mod device_tests;
mod validate_tests;
