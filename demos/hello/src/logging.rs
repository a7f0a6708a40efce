use std::backtrace::Backtrace;
use std::env;
use std::panic::PanicHookInfo;

use tracing::Event;
use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_appender::rolling::Rotation;
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::time::SystemTime;
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::fmt::FormatEvent;
use tracing_subscriber::fmt::FormatFields;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Registry;

/// Install a global subscriber writing to `<dir>/<app_name>.<date>`.
///
/// The returned guard flushes buffered logs when dropped, it must be kept
/// alive as long as the program logs.
pub fn init_logging(app_name: &str, dir: &str, level: &str) -> WorkerGuard {
    set_panic_hook();

    let f = RollingFileAppender::new(Rotation::DAILY, dir, app_name);
    let (writer, guard) = tracing_appender::non_blocking(f);

    let file_layer = fmt::Layer::new()
        .with_writer(writer)
        .with_ansi(false)
        .event_format(LearnerEventFormat {});

    // `RUST_LOG` takes precedence over `level`.
    let directives =
        env::var(EnvFilter::DEFAULT_ENV).unwrap_or_else(|_| level.to_string());

    let subscriber = Registry::default()
        .with(EnvFilter::new(directives))
        .with(file_layer);

    tracing::subscriber::set_global_default(subscriber)
        .expect("error setting global tracing subscriber");

    tracing::info!("logging to {}/{} at {}", dir, app_name, level);
    guard
}

/// Log panics through tracing before the default hook prints them.
pub fn set_panic_hook() {
    let prev_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        log_panic(panic);
        prev_hook(panic);
    }));
}

fn log_panic(panic: &PanicHookInfo) {
    let backtrace = format!("{:?}", Backtrace::force_capture());
    let message = panic.to_string().replace('\n', " ");

    match panic.location() {
        Some(location) => tracing::error!(
            message = %message,
            backtrace = %backtrace,
            panic.file = location.file(),
            panic.line = location.line(),
        ),
        None => tracing::error!(message = %message, backtrace = %backtrace),
    }
}

/// One line per event: `<time> <level> <span names> <fields>`.
///
/// The span names show which learner task an event comes from.
struct LearnerEventFormat {}

impl<S, N> FormatEvent<S, N> for LearnerEventFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'writer> FormatFields<'writer> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        SystemTime {}.format_time(&mut writer)?;
        write!(writer, " {:>5} ", event.metadata().level().as_str())?;

        if let Some(scope) = ctx.event_scope() {
            for span in scope.from_root() {
                write!(writer, "{}:", span.name())?;
            }
            writer.write_char(' ')?;
        }

        ctx.format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}
