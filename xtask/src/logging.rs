use std::io::Write;

use env_logger::{Builder, Env};

/// Stderr logger with the `[level] message` tags used across the tool's output.
/// `RUST_LOG` overrides the default `info` filter.
pub fn init() {
    Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {}",
                record.level().as_str().to_ascii_lowercase(),
                record.args()
            )
        })
        .init();
}
