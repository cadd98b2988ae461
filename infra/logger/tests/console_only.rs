use fitclass_logger::{LevelFilter, Logger};

#[test]
fn console_only_logger_writes_no_files() {
    let logger = Logger::builder()
        .name("integration-console-only")
        .console(true)
        .level(LevelFilter::INFO)
        .init()
        .expect("logger should initialize");

    assert_eq!(logger.name(), "integration-console-only");
    assert!(!logger.writes_files(), "console-only logger should not start a file writer");
}
