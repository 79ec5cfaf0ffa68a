/// `log` facade bridge
///
/// reqwest, hyper and teloxide report through the `log` crate. This forwards
/// their records into the same console/file sink under `LogTag::External`.
use super::config::{is_debug_enabled_for_tag, is_verbose_enabled_for_tag, LoggerConfig};
use super::levels::LogLevel;
use super::tags::LogTag;
use log::{Level, LevelFilter, Metadata, Record};

struct BridgeLogger;

static BRIDGE: BridgeLogger = BridgeLogger;

/// Map a `log` level onto ours
pub(crate) fn map_level(level: Level) -> LogLevel {
    match level {
        Level::Error => LogLevel::Error,
        Level::Warn => LogLevel::Warning,
        Level::Info => LogLevel::Info,
        Level::Debug => LogLevel::Debug,
        Level::Trace => LogLevel::Verbose,
    }
}

impl log::Log for BridgeLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let tag = LogTag::External(record.target().to_string());
        super::core::log_internal(tag, map_level(record.level()), &record.args().to_string());
    }

    fn flush(&self) {
        super::file::flush_file_logging();
    }
}

/// Dependency records pass at warning and above unless `--debug-external`
/// or `--verbose-external` asks for more
pub fn max_level(config: &LoggerConfig) -> LevelFilter {
    let external = LogTag::External(String::new());
    if is_verbose_enabled_for_tag(config, &external) {
        LevelFilter::Trace
    } else if is_debug_enabled_for_tag(config, &external) {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

/// Install the bridge; dependency chatter below `max` is dropped
pub fn install(max: LevelFilter) {
    if log::set_logger(&BRIDGE).is_ok() {
        log::set_max_level(max);
    }
}
