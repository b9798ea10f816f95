// ABOUTME: Proposal export to downloadable documents
// ABOUTME: Emits the stored Markdown as-is or renders it to a standalone HTML page

use std::fmt;
use std::str::FromStr;

use pulldown_cmark::{html, Options, Parser};
use pulldown_cmark_escape::escape_html;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::types::Proposal;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Markdown,
    Html,
}

impl ExportFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "text/markdown; charset=utf-8",
            ExportFormat::Html => "text/html; charset=utf-8",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "md",
            ExportFormat::Html => "html",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Markdown => f.write_str("markdown"),
            ExportFormat::Html => f.write_str("html"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown export format: {0} (expected markdown or html)")]
pub struct UnknownExportFormat(pub String);

impl FromStr for ExportFormat {
    type Err = UnknownExportFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            "html" => Ok(ExportFormat::Html),
            _ => Err(UnknownExportFormat(s.to_string())),
        }
    }
}

/// A rendered proposal ready to be sent as an attachment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedDocument {
    pub file_name: String,
    pub content_type: &'static str,
    pub body: String,
}

pub fn export_proposal(proposal: &Proposal, format: ExportFormat) -> ExportedDocument {
    let body = match format {
        ExportFormat::Markdown => proposal.markdown_content.clone(),
        ExportFormat::Html => render_html(&proposal.title, &proposal.markdown_content),
    };

    ExportedDocument {
        file_name: format!("{}.{}", file_stem(&proposal.title), format.extension()),
        content_type: format.content_type(),
        body,
    }
}

fn render_html(title: &str, markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(markdown, options);
    let mut rendered = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut rendered, parser);

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{}</body>\n</html>\n",
        escape_text(title),
        rendered
    )
}

fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    // Writing into a String is infallible
    let _ = escape_html(&mut escaped, text);
    escaped
}

/// ASCII-safe file stem: alphanumerics kept, runs of anything else become one `-`
fn file_stem(title: &str) -> String {
    let mut stem = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            stem.push(c);
        } else if !stem.is_empty() && !stem.ends_with('-') {
            stem.push('-');
        }
    }
    let stem = stem.trim_end_matches('-');

    if stem.is_empty() {
        "proposal".to_string()
    } else {
        stem.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    use crate::types::ProposalStatus;

    fn proposal(title: &str, markdown: &str) -> Proposal {
        Proposal {
            id: "proposal-1".to_string(),
            title: title.to_string(),
            client_name: "Acme".to_string(),
            industry: "Technology".to_string(),
            services: vec!["Strategy Development".to_string()],
            objectives: "Grow".to_string(),
            scope: None,
            timeline: "3 months".to_string(),
            budget: "$75,000".to_string(),
            tone: "professional".to_string(),
            template_id: None,
            markdown_content: markdown.to_string(),
            status: ProposalStatus::Draft,
            created_by: "alice".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_parse_format() {
        assert_eq!("markdown".parse::<ExportFormat>(), Ok(ExportFormat::Markdown));
        assert_eq!("MD".parse::<ExportFormat>(), Ok(ExportFormat::Markdown));
        assert_eq!("html".parse::<ExportFormat>(), Ok(ExportFormat::Html));
        assert!("pdf".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_markdown_export_is_verbatim() {
        let p = proposal("Acme - Technology Proposal", "# Executive Summary\n\nHello");
        let doc = export_proposal(&p, ExportFormat::Markdown);

        assert_eq!(doc.body, "# Executive Summary\n\nHello");
        assert_eq!(doc.file_name, "Acme-Technology-Proposal.md");
        assert_eq!(doc.content_type, "text/markdown; charset=utf-8");
    }

    #[test]
    fn test_html_export_renders_markdown() {
        let p = proposal(
            "Acme <Tech> Proposal",
            "# Summary\n\n| Phase | Weeks |\n|---|---|\n| One | 4 |\n",
        );
        let doc = export_proposal(&p, ExportFormat::Html);

        assert!(doc.body.contains("<title>Acme &lt;Tech&gt; Proposal</title>"));
        assert!(doc.body.contains("<h1>Summary</h1>"));
        assert!(doc.body.contains("<table>"));
        assert_eq!(doc.file_name, "Acme-Tech-Proposal.html");
    }

    #[test]
    fn test_title_escaping_covers_quotes_and_ampersands() {
        assert_eq!(
            escape_text("R&D \"Phase\" <1>"),
            "R&amp;D &quot;Phase&quot; &lt;1&gt;"
        );
    }

    #[test]
    fn test_file_stem_fallback() {
        assert_eq!(file_stem("*** ###"), "proposal");
        assert_eq!(file_stem("Café Zürich"), "Caf-Z-rich");
    }
}
