use std::sync::Once;

use tracing_subscriber::EnvFilter;

/// Install the test subscriber once per test binary.
///
/// Silent except for warnings unless `RUST_LOG` asks for more; output goes
/// through the test writer so it is captured per test.
pub fn init_tracing_from_env() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("crt_terminal=warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(false)
            .try_init();
    });
}
