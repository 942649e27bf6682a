// Integration test support for fftcmp end-to-end tests
//
// Builds result directories on disk and runs them through aggregation,
// chart planning and rendering.

pub mod test_harness;

pub use test_harness::{init_tracing, Fixture, TestResult};
