//! Printers: render a resolved object under an operation label.
//!
//! The reporter receives a [`PrinterFactory`] explicitly instead of consulting a
//! global registry. [`PrintFlags`] is the factory backing the `-o` flag.

use crate::error::RenderError;
use crate::resource::ResolvedItem;
use comfy_table::Table;
use std::fmt;
use std::str::FromStr;

/// Renders one item. The operation label comes first, then the serialization.
pub trait ResourcePrinter {
    fn render(&self, item: &ResolvedItem) -> Result<String, RenderError>;
}

/// Builds a printer bound to an operation label.
pub trait PrinterFactory {
    fn to_printer(&self, operation: &str) -> Result<Box<dyn ResourcePrinter>, RenderError>;
}

/// Supported `-o` values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Name,
    Json,
    Yaml,
    Table,
}

impl FromStr for OutputFormat {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "name" => Ok(OutputFormat::Name),
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            "table" | "wide" => Ok(OutputFormat::Table),
            _ => Err(RenderError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Name => "name",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
            OutputFormat::Table => "table",
        };
        f.write_str(name)
    }
}

/// Printer configuration parsed from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintFlags {
    pub format: OutputFormat,
}

impl PrintFlags {
    /// Validate the output format before any resolution happens.
    pub fn new(format: &str) -> Result<Self, RenderError> {
        Ok(Self {
            format: format.parse()?,
        })
    }
}

impl Default for PrintFlags {
    fn default() -> Self {
        Self {
            format: OutputFormat::Name,
        }
    }
}

impl PrinterFactory for PrintFlags {
    fn to_printer(&self, operation: &str) -> Result<Box<dyn ResourcePrinter>, RenderError> {
        let operation = operation.to_string();
        Ok(match self.format {
            OutputFormat::Name => Box::new(NamePrinter { operation }),
            OutputFormat::Json => Box::new(JsonPrinter { operation }),
            OutputFormat::Yaml => Box::new(YamlPrinter { operation }),
            OutputFormat::Table => Box::new(TablePrinter { operation }),
        })
    }
}

/// `pod/web-1`
pub struct NamePrinter {
    operation: String,
}

impl ResourcePrinter for NamePrinter {
    fn render(&self, item: &ResolvedItem) -> Result<String, RenderError> {
        Ok(format!(
            "{}{}/{}\n",
            self.operation,
            item.kind.to_lowercase(),
            item.name
        ))
    }
}

pub struct JsonPrinter {
    operation: String,
}

impl ResourcePrinter for JsonPrinter {
    fn render(&self, item: &ResolvedItem) -> Result<String, RenderError> {
        let body = serde_json::to_string_pretty(&item.object)
            .map_err(|e| RenderError::Serialize(e.to_string()))?;
        Ok(format!("{}{}\n", self.operation, body))
    }
}

pub struct YamlPrinter {
    operation: String,
}

impl ResourcePrinter for YamlPrinter {
    fn render(&self, item: &ResolvedItem) -> Result<String, RenderError> {
        let body = serde_norway::to_string(&item.object)
            .map_err(|e| RenderError::Serialize(e.to_string()))?;
        Ok(format!("{}{}", self.operation, body))
    }
}

pub struct TablePrinter {
    operation: String,
}

impl ResourcePrinter for TablePrinter {
    fn render(&self, item: &ResolvedItem) -> Result<String, RenderError> {
        let mut table = Table::new();
        table.load_preset(comfy_table::presets::UTF8_FULL);
        table.set_header(vec!["NAMESPACE", "NAME", "KIND", "CREATED"]);
        let namespace = if item.namespace.is_empty() {
            "-".to_string()
        } else {
            item.namespace.clone()
        };
        let created = item
            .creation_time
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| "<unknown>".to_string());
        table.add_row(vec![namespace, item.name.clone(), item.kind.clone(), created]);
        Ok(format!("{}{}\n", self.operation, table))
    }
}
