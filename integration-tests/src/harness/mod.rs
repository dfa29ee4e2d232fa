mod fixture;
pub mod tracing;

pub use fixture::{LogFixture, at, notification_line, viewer_line};
pub use tracing::{CapturedEvent, init_test_tracing};
