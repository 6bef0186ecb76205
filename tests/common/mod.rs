//! Common test utilities for jira-batch


pub use fixtures::{ids, issue, sorted_record_ids};
pub use stubs::{FetchEvent, InstrumentedFetcher, ScriptedBulk, StubSearch};

/// Skip test if environment variable is not set
#[macro_export]
macro_rules! skip_without_env {
    ($var:expr) => {
        if std::env::var($var).is_err() {
            eprintln!("Skipping test: {} environment variable not set", $var);
            return;
        }
    };
}
