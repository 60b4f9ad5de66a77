//! Redacting JSON [layer](https://docs.rs/tracing-subscriber/0.3/tracing_subscriber/layer/trait.Layer.html).
//!
//! Every event becomes one JSON object (timestamp, level, target, event fields,
//! enclosing span fields), is passed through a [`Redactor`], and is written
//! as a single line.

use std::{fmt, io::Write};

use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};
use tracing::{
    Event, Id, Subscriber,
    field::{Field, Visit},
    span::{Attributes, Record},
};
use tracing_subscriber::{
    Layer,
    fmt::MakeWriter,
    layer::Context,
    registry::LookupSpan,
};

use crate::redact::Redactor;

/// Layer that redacts every event before writing it.
pub struct RedactingLayer<W = fn() -> std::io::Stdout> {
    redactor: Redactor,
    make_writer: W,
}

impl RedactingLayer {
    /// Creates a layer writing to stdout.
    pub fn new(redactor: Redactor) -> Self {
        Self {
            redactor,
            make_writer: std::io::stdout,
        }
    }
}

impl<W> RedactingLayer<W> {
    /// Swaps the output destination.
    pub fn with_writer<W2>(self, make_writer: W2) -> RedactingLayer<W2>
    where
        W2: for<'a> MakeWriter<'a> + 'static,
    {
        RedactingLayer {
            redactor: self.redactor,
            make_writer,
        }
    }

    pub fn redactor(&self) -> &Redactor {
        &self.redactor
    }
}

impl<W> fmt::Debug for RedactingLayer<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedactingLayer")
            .field("redactor", &self.redactor)
            .finish_non_exhaustive()
    }
}

/// Span fields, kept in the span's extensions.
struct SpanFields(Map<String, Value>);

/// Visitor collecting fields into a JSON map.
///
/// Values under sensitive keys are always kept as strings so the redactor can
/// mask them.
struct JsonVisitor<'a> {
    fields: &'a mut Map<String, Value>,
    redactor: &'a Redactor,
}

impl<'a> JsonVisitor<'a> {
    fn new(fields: &'a mut Map<String, Value>, redactor: &'a Redactor) -> Self {
        Self { fields, redactor }
    }

    fn insert(&mut self, field: &Field, value: Value) {
        self.fields.insert(field.name().to_string(), value);
    }

    fn insert_text(&mut self, field: &Field, value: &str) {
        let value = if self.redactor.is_sensitive(field.name()) {
            Value::String(value.to_string())
        } else {
            structured_or_string(value)
        };
        self.insert(field, value);
    }
}

impl Visit for JsonVisitor<'_> {
    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, Value::from(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.insert(field, Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, Value::from(value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.insert_text(field, value);
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.insert(field, Value::from(value.to_string()));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let text = format!("{:?}", value);
        // `?some_string` arrives quoted and escaped.
        let text = if text.starts_with('"') {
            serde_json::from_str::<String>(&text).unwrap_or(text)
        } else {
            text
        };
        self.insert_text(field, &text);
    }
}

/// Serialized JSON objects and arrays (e.g. `payload = %body`) are parsed back
/// so the redactor can see their keys.
fn structured_or_string(value: &str) -> Value {
    let trimmed = value.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        if let Ok(parsed @ (Value::Object(_) | Value::Array(_))) =
            serde_json::from_str::<Value>(value)
        {
            return parsed;
        }
    }
    Value::String(value.to_string())
}

impl<S, W> Layer<S> for RedactingLayer<W>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'a> MakeWriter<'a> + 'static,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        let mut fields = Map::new();
        attrs.record(&mut JsonVisitor::new(&mut fields, &self.redactor));
        span.extensions_mut().insert(SpanFields(fields));
    }

    fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        let mut extensions = span.extensions_mut();
        if let Some(SpanFields(fields)) = extensions.get_mut::<SpanFields>() {
            values.record(&mut JsonVisitor::new(fields, &self.redactor));
        }
    }

    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let mut record = Map::new();
        record.insert(
            "timestamp".into(),
            Value::from(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        record.insert("level".into(), Value::from(metadata.level().to_string()));
        record.insert("target".into(), Value::from(metadata.target()));

        let mut fields = Map::new();
        event.record(&mut JsonVisitor::new(&mut fields, &self.redactor));
        record.insert("fields".into(), Value::Object(fields));

        if let Some(scope) = ctx.event_scope(event) {
            let spans: Vec<Value> = scope
                .from_root()
                .map(|span| {
                    let mut entry = Map::new();
                    entry.insert("name".into(), Value::from(span.name()));
                    if let Some(SpanFields(fields)) = span.extensions().get::<SpanFields>() {
                        entry.insert("fields".into(), Value::Object(fields.clone()));
                    }
                    Value::Object(entry)
                })
                .collect();
            if !spans.is_empty() {
                record.insert("spans".into(), Value::Array(spans));
            }
        }

        let mut record = Value::Object(record);
        self.redactor.filter(&mut record);

        let Ok(mut line) = serde_json::to_vec(&record) else {
            return;
        };
        line.push(b'\n');
        let mut writer = self.make_writer.make_writer_for(metadata);
        // Logging must never fail the caller.
        let _ = writer.write_all(&line);
    }
}
