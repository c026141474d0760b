use std::path::PathBuf;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable naming the log file base path.
pub const LOG_ENV: &str = "WORDBOX_LOG";

/// Install a file-backed subscriber when `WORDBOX_LOG` is set.
///
/// Logging stays off otherwise so the play loop owns the terminal. The
/// filter comes from `RUST_LOG` and defaults to `info`.
pub fn init_tracing() {
    let Some(base) = std::env::var_os(LOG_ENV) else {
        return;
    };
    let path = unique_log_path(&PathBuf::from(base), std::process::id());

    let file = match std::fs::File::create(&path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("Warning: failed to create log file {}: {}", path.display(), err);
            return;
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();
}

/// `{base}.{timestamp}.{pid}` so concurrent runs never share a file.
pub fn unique_log_path(base: &std::path::Path, pid: u32) -> PathBuf {
    let timestamp = chrono::Utc::now().timestamp();
    let mut name = base.as_os_str().to_owned();
    name.push(format!(".{}.{}", timestamp, pid));
    PathBuf::from(name)
}
