//! Exporters for composed Mermaid text.
//!
//! Each [`Format`] maps to an [`Exporter`] that wraps the composed diagram
//! for a particular consumer: a raw `.mmd` file, a Markdown document, or a
//! standalone HTML page that renders the diagram in the browser.

use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::config::ExportConfig;

/// Errors raised while exporting.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to encode diagram: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Output format of an export.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Raw Mermaid text.
    #[default]
    Mermaid,
    /// A Markdown fenced `mermaid` block.
    Markdown,
    /// A standalone HTML page.
    Html,
}

impl Format {
    /// Returns the conventional file extension, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Mermaid => "mmd",
            Format::Markdown => "md",
            Format::Html => "html",
        }
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mermaid" | "mmd" => Ok(Self::Mermaid),
            "markdown" | "md" => Ok(Self::Markdown),
            "html" => Ok(Self::Html),
            _ => Err(format!("Invalid export format: {s}")),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Format::Mermaid => "mermaid",
            Format::Markdown => "markdown",
            Format::Html => "html",
        };
        f.write_str(name)
    }
}

/// Wraps composed Mermaid text for one output format.
pub trait Exporter {
    fn export(&self, code: &str, title: &str) -> Result<String, Error>;
}

/// Returns the exporter for `format`.
pub fn exporter(format: Format, config: &ExportConfig) -> Box<dyn Exporter> {
    match format {
        Format::Mermaid => Box::new(MermaidExporter),
        Format::Markdown => Box::new(MarkdownExporter),
        Format::Html => Box::new(HtmlExporter::new(config)),
    }
}

/// Writes the diagram unchanged, terminated by a newline.
pub struct MermaidExporter;

impl Exporter for MermaidExporter {
    fn export(&self, code: &str, _title: &str) -> Result<String, Error> {
        Ok(format!("{code}\n"))
    }
}

/// Writes a level-one heading followed by a fenced `mermaid` block.
pub struct MarkdownExporter;

impl Exporter for MarkdownExporter {
    fn export(&self, code: &str, title: &str) -> Result<String, Error> {
        Ok(format!("# {title}\n\n```mermaid\n{code}\n```\n"))
    }
}

/// Writes an HTML page that loads Mermaid and renders the diagram.
pub struct HtmlExporter {
    theme: String,
    script_url: String,
}

impl HtmlExporter {
    pub fn new(config: &ExportConfig) -> Self {
        Self {
            theme: config.theme().to_string(),
            script_url: config.mermaid_url().to_string(),
        }
    }

    fn background(&self) -> &'static str {
        if self.theme == "dark" {
            "#0e1117"
        } else {
            "#ffffff"
        }
    }
}

impl Exporter for HtmlExporter {
    fn export(&self, code: &str, title: &str) -> Result<String, Error> {
        let code_json = script_literal(code)?;
        let theme_json = script_literal(&self.theme)?;
        let title = escape_html(title);
        let script_url = escape_html(&self.script_url);
        let background = self.background();

        Ok(format!(
            r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>{title}</title>
  <script src="{script_url}"></script>
  <style>
    body {{ margin: 0; padding: 12px; background: {background}; font-family: sans-serif; }}
    #diagram {{ display: flex; justify-content: center; }}
    #diagram svg {{ max-width: 100%; height: auto; }}
  </style>
</head>
<body>
  <div id="diagram"></div>
  <script>
    const code = {code_json};
    mermaid.initialize({{ startOnLoad: false, theme: {theme_json}, securityLevel: 'loose' }});
    mermaid.render('mermaid-svg', code).then(({{ svg }}) => {{
      document.getElementById('diagram').innerHTML = svg;
    }}).catch((err) => {{
      const pre = document.createElement('pre');
      pre.textContent = 'Mermaid render error: ' + err;
      document.getElementById('diagram').appendChild(pre);
    }});
  </script>
</body>
</html>
"#
        ))
    }
}

/// Encodes `text` as a JSON string literal that is safe inside `<script>`.
fn script_literal(text: &str) -> Result<String, Error> {
    Ok(serde_json::to_string(text)?.replace("</", "<\\/"))
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
