#![allow(dead_code)]

pub use taskdag_test_utils::builders;
pub use taskdag_test_utils::{FakeBackend, RecordingSurface, init_tracing, with_timeout};
