//! Export functionality for duplicate reports.
//!
//! JSON mirrors the in-process report shape; HTML is a standalone page with
//! the thumbnails embedded, so it can be opened after the uploads are gone.

use super::{ImageEntry, Report};
use crate::error::ReportError;
use chrono::Local;
use std::io::Write;
use std::path::Path;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Html,
}

/// Write the report as pretty-printed JSON
pub fn export_json<W: Write>(report: &Report, mut writer: W) -> Result<(), ReportError> {
    serde_json::to_writer_pretty(&mut writer, report)?;
    writeln!(writer).map_err(serde_json::Error::io)?;
    Ok(())
}

/// Write the report as a standalone HTML page
pub fn export_html<W: Write>(report: &Report, mut writer: W, title: &str) -> std::io::Result<()> {
    let title = escape_html(title);

    write!(
        writer,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
        :root {{
            --bg-primary: #0a0a0a;
            --bg-secondary: #1a1a1a;
            --bg-tertiary: #2a2a2a;
            --text-primary: #ffffff;
            --text-secondary: #a0a0a0;
            --accent: #3b82f6;
            --warning: #f59e0b;
            --danger: #ef4444;
        }}

        * {{ margin: 0; padding: 0; box-sizing: border-box; }}

        body {{
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            background: var(--bg-primary);
            color: var(--text-primary);
            line-height: 1.6;
            padding: 2rem;
        }}

        .container {{ max-width: 1200px; margin: 0 auto; }}

        header {{
            text-align: center;
            margin-bottom: 2rem;
            padding-bottom: 1.5rem;
            border-bottom: 1px solid var(--bg-tertiary);
        }}

        h1 {{ font-size: 2.25rem; color: var(--accent); }}
        h2 {{ margin: 2rem 0 1rem; font-size: 1.25rem; }}

        .summary {{
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
            gap: 1rem;
            margin-bottom: 2rem;
        }}

        .stat-card {{
            background: var(--bg-secondary);
            padding: 1.25rem;
            border-radius: 12px;
            text-align: center;
        }}

        .stat-value {{ font-size: 2rem; font-weight: bold; color: var(--accent); }}
        .stat-label {{ color: var(--text-secondary); font-size: 0.875rem; }}

        .group {{
            background: var(--bg-secondary);
            border-radius: 16px;
            margin-bottom: 1.5rem;
            overflow: hidden;
        }}

        .group-header {{
            padding: 1rem 1.5rem;
            background: var(--bg-tertiary);
            display: flex;
            justify-content: space-between;
        }}

        .hash {{ font-family: monospace; color: var(--warning); }}

        .images {{
            display: grid;
            grid-template-columns: repeat(auto-fill, minmax(220px, 1fr));
            gap: 1rem;
            padding: 1.5rem;
        }}

        .image {{
            background: var(--bg-tertiary);
            border-radius: 8px;
            padding: 0.75rem;
            text-align: center;
        }}

        .image img {{ max-width: 200px; max-height: 200px; }}
        .no-preview {{ color: var(--text-secondary); padding: 2rem 0; }}
        .filename {{ font-size: 0.8rem; word-break: break-all; margin-top: 0.5rem; }}
        .reason {{ font-size: 0.75rem; color: var(--danger); }}

        footer {{
            text-align: center;
            padding: 2rem;
            color: var(--text-secondary);
            font-size: 0.875rem;
        }}
    </style>
</head>
<body>
    <div class="container">
        <header>
            <h1>{title}</h1>
        </header>

        <div class="summary">
            <div class="stat-card">
                <div class="stat-value">{total}</div>
                <div class="stat-label">Total Images</div>
            </div>
            <div class="stat-card">
                <div class="stat-value">{groups}</div>
                <div class="stat-label">Duplicate Groups</div>
            </div>
            <div class="stat-card">
                <div class="stat-value">{unique}</div>
                <div class="stat-label">Unique Images</div>
            </div>
            <div class="stat-card">
                <div class="stat-value">{failed}</div>
                <div class="stat-label">Unreadable</div>
            </div>
        </div>
"#,
        title = title,
        total = report.total_images,
        groups = report.duplicate_groups.len(),
        unique = report.unique_images,
        failed = report.failed_images,
    )?;

    if !report.duplicate_groups.is_empty() {
        writeln!(writer, "        <h2>Duplicate Groups</h2>")?;
    }

    for (i, group) in report.duplicate_groups.iter().enumerate() {
        write!(
            writer,
            r#"
        <div class="group">
            <div class="group-header">
                <span>Group {} ({} images)</span>
                <span class="hash">{}</span>
            </div>
            <div class="images">
"#,
            i + 1,
            group.count,
            escape_html(&group.hash)
        )?;

        for image in &group.images {
            write_image(&mut writer, image)?;
        }

        writeln!(writer, "            </div>\n        </div>")?;
    }

    if !report.unique_images_list.is_empty() {
        writeln!(
            writer,
            "        <h2>Unique Images</h2>\n        <div class=\"group\"><div class=\"images\">"
        )?;
        for image in &report.unique_images_list {
            write_image(&mut writer, image)?;
        }
        writeln!(writer, "        </div></div>")?;
    }

    if !report.failed_images_list.is_empty() {
        writeln!(
            writer,
            "        <h2>Could Not Be Read</h2>\n        <div class=\"group\"><div class=\"images\">"
        )?;
        for failed in &report.failed_images_list {
            write!(
                writer,
                r#"
                <div class="image">
                    <div class="filename">{}</div>
                    <div class="reason">{}</div>
                </div>
"#,
                escape_html(&failed.filename),
                escape_html(&failed.reason)
            )?;
        }
        writeln!(writer, "        </div></div>")?;
    }

    write!(
        writer,
        r#"
        <footer>
            <p>Generated {}</p>
        </footer>
    </div>
</body>
</html>
"#,
        Local::now().format("%Y-%m-%d %H:%M")
    )?;

    Ok(())
}

fn write_image<W: Write>(writer: &mut W, image: &ImageEntry) -> std::io::Result<()> {
    let preview = match &image.thumbnail {
        // Data URIs are base64 and need no escaping
        Some(uri) => format!(r#"<img src="{}" alt="{}">"#, uri, escape_html(&image.filename)),
        None => r#"<div class="no-preview">No preview</div>"#.to_string(),
    };

    write!(
        writer,
        r#"
                <div class="image">
                    {}
                    <div class="filename">{}</div>
                </div>
"#,
        preview,
        escape_html(&image.filename)
    )
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
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Export the report to a file
pub fn export_to_file(report: &Report, path: &Path, format: ExportFormat) -> Result<(), ReportError> {
    let write_error = |source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = std::fs::File::create(path).map_err(write_error)?;
    let mut writer = std::io::BufWriter::new(file);

    match format {
        ExportFormat::Json => export_json(report, &mut writer)?,
        ExportFormat::Html => {
            let title = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("Duplicate Report");
            export_html(report, &mut writer, title).map_err(write_error)?;
        }
    }

    // The tail of the report may still be buffered
    writer.flush().map_err(write_error)
}
