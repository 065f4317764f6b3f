//Copyright 2024 Felix Engl
//
//Licensed under the Apache License, Version 2.0 (the "License");
//you may not use this file except in compliance with the License.
//You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
//Unless required by applicable law or agreed to in writing, software
//distributed under the License is distributed on an "AS IS" BASIS,
//WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//See the License for the specific language governing permissions and
//limitations under the License.

use anyhow::Context;
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::Config;
use crate::config::Configs;

const PATTERN: &str = "{l}@Thread{I} - {d} - {m}{n}";

/// The crates logging at the configured level, everything else logs warnings only.
const LOGGERS: &[&str] = &["cvsift", "text_processing", "classifier"];

/// Records go to stdout, so the console log writes to stderr.
const CONSOLE_TARGET: Target = Target::Stderr;

fn console_appender() -> ConsoleAppender {
    ConsoleAppender::builder()
        .target(CONSOLE_TARGET)
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build()
}

fn build_config(configs: &Configs) -> anyhow::Result<Config> {
    let config = Config::builder();

    let config = if configs.system.log_to_file {
        let file = configs.paths.file_log();
        eprintln!("Logging to {file}");
        let file_logger = FileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(PATTERN)))
            .build(&file)
            .with_context(|| format!("Failed to open the log file {file}"))?;
        config.appender(Appender::builder().build("out", Box::new(file_logger)))
    } else {
        config.appender(Appender::builder().build("out", Box::new(console_appender())))
    };

    let config = LOGGERS
        .iter()
        .fold(config, |config, name| {
            config.logger(Logger::builder().build(*name, configs.system.log_level))
        })
        .build(Root::builder().appender("out").build(LevelFilter::Warn))?;
    Ok(config)
}

/// Configure the logging
pub fn configure_logging(configs: &Configs) -> anyhow::Result<()> {
    log4rs::init_config(build_config(configs)?)?;
    Ok(())
}

#[cfg(test)]
mod test {
    use log::LevelFilter;
    use log4rs::append::console::Target;
    use crate::config::Configs;
    use super::{build_config, CONSOLE_TARGET, LOGGERS};

    #[test]
    fn console_logs_stay_off_stdout() {
        assert!(matches!(CONSOLE_TARGET, Target::Stderr));
        let config = build_config(&Configs::default()).unwrap();
        assert_eq!(config.appenders().len(), 1);
        assert_eq!(config.root().level(), LevelFilter::Warn);
        assert_eq!(config.loggers().len(), LOGGERS.len());
    }

    #[test]
    fn file_logging_opens_the_log_file() {
        let folder = camino_tempfile::tempdir().unwrap();
        let mut configs = Configs::default();
        configs.paths.root = folder.path().to_path_buf();
        configs.system.log_to_file = true;
        build_config(&configs).unwrap();
        assert!(configs.paths.file_log().is_file());
    }
}
