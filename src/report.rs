//! Reporter: composes the per-item message and writes the rendered object.

use crate::error::{ApiError, RenderError};
use crate::printer::PrinterFactory;
use crate::resource::{ItemSource, ResolvedItem};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::io::Write;

/// Container paths searched for image references, in order
const CONTAINER_PATHS: &[&[&str]] = &[
    &["spec", "containers"],
    &["spec", "template", "spec", "containers"],
];

/// Creation time rendering, e.g. `2024-03-01 10:00:00 +0000 UTC`.
pub fn format_creation_time(time: Option<DateTime<Utc>>) -> String {
    match time {
        Some(t) => t.format("%Y-%m-%d %H:%M:%S %z UTC").to_string(),
        None => "<unknown>".to_string(),
    }
}

/// Image references under the conventional container paths. Missing paths yield nothing.
pub fn container_images(object: &Value) -> Vec<String> {
    let mut images = Vec::new();
    for path in CONTAINER_PATHS {
        let containers = path
            .iter()
            .try_fold(object, |value, key| value.get(*key))
            .and_then(Value::as_array);
        if let Some(containers) = containers {
            images.extend(
                containers
                    .iter()
                    .filter_map(|c| c.get("image").and_then(Value::as_str))
                    .map(str::to_string),
            );
        }
    }
    images
}

/// The message line for an item, including its trailing newline.
pub fn compose_message(item: &ResolvedItem) -> String {
    match &item.source {
        ItemSource::Manifest { .. } => format!("Hello {} {} \n", item.kind, item.name),
        ItemSource::Store => {
            let mut message = format!(
                "Hello {} {} {}",
                item.kind,
                item.name,
                format_creation_time(item.creation_time)
            );
            for image in container_images(&item.object) {
                message.push(' ');
                message.push_str(&image);
            }
            message.push('\n');
            message
        }
    }
}

/// Writes one report per item to the output stream.
pub struct Reporter<'a> {
    printers: &'a dyn PrinterFactory,
    out: &'a mut dyn Write,
}

impl<'a> Reporter<'a> {
    pub fn new(printers: &'a dyn PrinterFactory, out: &'a mut dyn Write) -> Self {
        Self { printers, out }
    }

    /// Render the item under its message and write it with a single write.
    pub fn report(&mut self, item: &ResolvedItem) -> Result<(), ApiError> {
        let message = compose_message(item);
        let printer = self.printers.to_printer(&message)?;
        let rendered = printer.render(item)?;
        self.out
            .write_all(rendered.as_bytes())
            .map_err(RenderError::Write)?;
        Ok(())
    }
}
