use std::any::Any;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, prelude::*};

const DEFAULT_FILTER: &str = "cashbook=info,cashbook_qr=info,warn";

/// Daily rolling log files and what goes in each
const LOG_FILES: [(&str, &str); 2] = [
   ("trace.log", "cashbook=trace,cashbook_qr=trace"),
   ("output.log", DEFAULT_FILTER),
];

/// Flushes the log files when dropped, keep it alive until the app exits
pub struct LogGuards(#[allow(dead_code)] Vec<WorkerGuard>);

/// `logs` next to the working directory
pub fn log_dir() -> PathBuf {
   std::env::current_dir()
      .map(|dir| dir.join("logs"))
      .unwrap_or_else(|_| PathBuf::from("logs"))
}

/// Console filter, `RUST_LOG` wins over the default
fn console_filter() -> EnvFilter {
   EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Log to the console and to the files in [LOG_FILES] under `dir`
pub fn setup_tracing(dir: &Path) -> LogGuards {
   let mut guards = Vec::with_capacity(LOG_FILES.len());
   let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::with_capacity(LOG_FILES.len() + 1);

   for (file, filter) in LOG_FILES {
      let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, file));
      guards.push(guard);
      layers.push(
         fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_filter(EnvFilter::new(filter))
            .boxed(),
      );
   }

   layers.push(
      fmt::layer()
         .with_writer(std::io::stdout)
         .with_filter(console_filter())
         .boxed(),
   );

   if let Err(e) = Registry::default().with(layers).try_init() {
      eprintln!("Logging was already set up: {}", e);
   }

   LogGuards(guards)
}

/// Text of a panic payload, panics carry either a `&str` or a `String`
fn panic_message(payload: &(dyn Any + Send)) -> &str {
   payload
      .downcast_ref::<&str>()
      .copied()
      .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
      .unwrap_or("unknown panic")
}

/// Send panics to the log files, a GUI app has no console to print them to on Windows
pub fn log_panics() {
   std::panic::set_hook(Box::new(|info| {
      let location = info
         .location()
         .map(|loc| loc.to_string())
         .unwrap_or_else(|| "unknown location".to_string());
      tracing::error!(%location, "Panic: {}", panic_message(info.payload()));
   }));
}
