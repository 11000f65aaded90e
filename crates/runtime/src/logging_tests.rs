use super::*;
use log::{Level, Metadata, Record};
use serial_test::serial;

fn memory_logger(level: Level) -> Logger {
    Logger {
        level,
        target: LogTarget::Memory(Mutex::new(Vec::new())),
    }
}

fn captured(logger: &Logger) -> Vec<String> {
    match &logger.target {
        LogTarget::Memory(lines) => lines.lock().expect("lock").clone(),
        LogTarget::Stderr => Vec::new(),
    }
}

#[test]
fn parse_level_handles_known_and_unknown_values() {
    let cases: &[(Option<&str>, Level)] = &[
        (None, Level::Warn),
        (Some("debug"), Level::Debug),
        (Some("DEBUG"), Level::Debug),
        (Some("info"), Level::Info),
        (Some("warn"), Level::Warn),
        (Some("error"), Level::Error),
        (Some("Trace"), Level::Trace),
        (Some("garbage"), Level::Warn),
        (Some("off"), Level::Warn),
        (Some(""), Level::Warn),
    ];

    for (value, expected) in cases {
        let got = parse_level(*value);
        assert_eq!(
            got, *expected,
            "value {:?} should yield level {:?}, got {:?}",
            value, expected, got
        );
    }
}

#[test]
#[serial]
fn get_level_from_env_reads_program_variable() {
    unsafe { std::env::set_var(PROGRAM_LOG_LEVEL, "info") };
    assert_eq!(get_level_from_env(), Level::Info);

    unsafe { std::env::remove_var(PROGRAM_LOG_LEVEL) };
    assert_eq!(get_level_from_env(), Level::Warn);
}

#[test]
fn enabled_respects_level_threshold() {
    let levels = [
        Level::Error,
        Level::Warn,
        Level::Info,
        Level::Debug,
        Level::Trace,
    ];

    for logger_level in levels {
        let logger = memory_logger(logger_level);

        for record_level in levels {
            let meta = Metadata::builder()
                .level(record_level)
                .target("dcomp")
                .build();

            assert_eq!(
                logger.enabled(&meta),
                record_level <= logger_level,
                "logger level {:?}, record level {:?}",
                logger_level,
                record_level
            );
        }
    }
}

#[test]
fn log_formats_level_target_and_message() {
    let logger = memory_logger(Level::Info);

    let msg = "walked 3 entries";
    let args = format_args!("{msg}");
    let record = Record::builder()
        .level(Level::Info)
        .target("walk")
        .args(args)
        .build();
    logger.log(&record);

    let lines = captured(&logger);
    assert_eq!(lines.len(), 1);
    assert!(
        lines[0].ends_with("INFO [walk] walked 3 entries"),
        "unexpected line: {}",
        lines[0]
    );
}

#[test]
fn log_drops_records_above_level() {
    let logger = memory_logger(Level::Warn);

    let msg = "noisy";
    let args = format_args!("{msg}");
    let record = Record::builder()
        .level(Level::Debug)
        .target("t")
        .args(args)
        .build();
    logger.log(&record);

    assert!(captured(&logger).is_empty());
}

#[test]
fn stderr_logger_does_not_panic() {
    let logger = Logger {
        level: Level::Info,
        target: LogTarget::Stderr,
    };

    for (lvl, msg) in [(Level::Info, "info"), (Level::Error, "error")] {
        let args = format_args!("{msg}");
        let record = Record::builder().level(lvl).target("t").args(args).build();
        logger.log(&record);
    }

    logger.flush();
}
