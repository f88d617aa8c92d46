use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

/// Initializes the logging system.
///
/// Prefers a `log4rs.yaml` next to the binary so deployments can reconfigure
/// appenders without a rebuild; falls back to a console appender at `info`.
/// Should be called once at the beginning of the application's execution.
pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    if std::path::Path::new("log4rs.yaml").exists() {
        log4rs::init_file("log4rs.yaml", Default::default())?;
        return Ok(());
    }
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new("{d(%Y-%m-%dT%H:%M:%S)} {l} {t} - {m}{n}")))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(log::LevelFilter::Info))?;
    log4rs::init_config(config)?;
    Ok(())
}
