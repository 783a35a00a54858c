use std::fmt;
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::{format::Writer, FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Event formatter that brackets every field of the line prefix.
///
/// Format: `[TIME] [LEVEL] [SCOPE] [TARGET file:line]: MESSAGE` where SCOPE is
/// the chain of active spans (outermost first), or the last target segment
/// when no span is active.
pub struct BracketedFormatter;

impl<S, N> FormatEvent<S, N> for BracketedFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let metadata = event.metadata();

        let now = chrono::Local::now();
        write!(writer, "[{}] ", now.format("%Y-%m-%d %H:%M:%S%.3f"))?;
        write!(writer, "[{:5}] ", metadata.level())?;

        let scope = match ctx.event_scope() {
            Some(spans) => spans
                .from_root()
                .map(|span| span.name())
                .collect::<Vec<_>>()
                .join(">"),
            None => metadata
                .target()
                .rsplit("::")
                .next()
                .unwrap_or("unknown")
                .to_string(),
        };
        write!(writer, "[{}] ", scope)?;

        match (metadata.file(), metadata.line()) {
            (Some(file), Some(line)) => {
                write!(writer, "[{} {}:{}]: ", metadata.target(), file, line)?
            }
            _ => write!(writer, "[{}]: ", metadata.target())?,
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}
