//! Process logger setup.

use std::io::Write;

use env_logger::{Builder, Env, WriteStyle};

use crate::config::LogFormat;

/// Install the global logger. `RUST_LOG` overrides the default `info` filter.
pub fn init(format: LogFormat) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));

    match format {
        LogFormat::Human => {
            builder.write_style(WriteStyle::Always);
        }
        LogFormat::Plain => {
            builder.write_style(WriteStyle::Never);
        }
        LogFormat::Json => {
            builder.write_style(WriteStyle::Never).format(|buf, record| {
                let line = serde_json::json!({
                    "time": buf.timestamp().to_string(),
                    "level": record.level().to_string().to_lowercase(),
                    "target": record.target(),
                    "message": record.args().to_string(),
                });
                writeln!(buf, "{}", line)
            });
        }
    }

    builder.init();
}
