//! Plain-text event format that names the planning stage an event belongs to.
//!
//! Each line is `TIMESTAMP LEVEL target [root/span] fields`. The bracketed part lists
//! span names from the outermost scope (e.g. `[usecase_draft]`) and the numeric id of
//! the innermost span, so lines from one stage run can be grepped together.

use std::fmt;

use tracing_core::{Event, Subscriber};
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::fmt::time::{FormatTime, SystemTime};
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::registry::LookupSpan;

#[derive(Default)]
pub struct SpanLineFormat {
    timer: SystemTime,
}

impl<S, N> FormatEvent<S, N> for SpanLineFormat
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
        self.timer.format_time(&mut writer)?;
        let meta = event.metadata();
        write!(writer, " {:>5} {}", meta.level(), meta.target())?;

        if let Some(scope) = ctx.event_scope() {
            let mut names = Vec::new();
            let mut innermost = None;
            for span in scope.from_root() {
                names.push(span.name());
                innermost = Some(span.id().into_u64());
            }
            if let Some(id) = innermost {
                write!(writer, " [{}#{}]", names.join("/"), id)?;
            }
        }

        write!(writer, " ")?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}
