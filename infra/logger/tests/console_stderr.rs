use fitclass_logger::{LevelFilter, Logger};

#[test]
fn json_logger_on_stderr_initializes() {
    let logger = Logger::builder()
        .name("integration-console-stderr")
        .stderr(true)
        .json(true)
        .level(LevelFilter::DEBUG)
        .init()
        .expect("logger should initialize");

    tracing::info!("routed to stderr");
    assert!(!logger.writes_files());
}
