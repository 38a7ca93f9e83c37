//! Fact sheet rendering - field table, extract and raw TLE block

use crate::types::ResultRecord;
use owo_colors::OwoColorize;

/// Placeholder for absent values
pub const MISSING: &str = "—";

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub color: bool,
    /// Print the whole extract instead of its first paragraph
    pub full_extract: bool,
}

/// Field/value listing in display order. TLE rows only appear with a catalog record.
pub fn fact_rows(record: &ResultRecord) -> Vec<(&'static str, String)> {
    let text = |value: Option<&str>| {
        value
            .filter(|v| !v.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| MISSING.to_string())
    };
    let claim = |value: &Option<crate::claims::ClaimValue>| {
        value
            .as_ref()
            .map(|v| v.display())
            .unwrap_or_else(|| MISSING.to_string())
    };

    let mut rows = vec![
        ("Title", text(record.summary.title.as_deref())),
        ("Description", text(record.summary.description.as_deref())),
        ("Launch Date", claim(&record.launch_date)),
        ("COSPAR ID", claim(&record.cospar_id)),
        ("NORAD ID", claim(&record.norad_id)),
    ];

    if let Some(tle) = &record.catalog {
        rows.push(("TLE Name", tle.name.clone()));
        rows.push(("TLE Line 1", tle.line1.clone()));
        rows.push(("TLE Line 2", tle.line2.clone()));
    }

    rows
}

fn heading(text: &str, opts: &RenderOptions) -> String {
    if opts.color {
        text.bold().cyan().to_string()
    } else {
        text.to_string()
    }
}

fn dim(text: &str, opts: &RenderOptions) -> String {
    if opts.color {
        text.dimmed().to_string()
    } else {
        text.to_string()
    }
}

fn first_paragraph(extract: &str) -> &str {
    extract
        .split('\n')
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("")
}

/// Plain-text fact sheet
pub fn render_text(record: &ResultRecord, opts: &RenderOptions) -> String {
    let mut out = String::new();

    out.push_str(&heading("Overview", opts));
    out.push('\n');
    out.push_str(&format!(
        "  Title:       {}\n",
        record
            .summary
            .title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(MISSING)
    ));
    out.push_str(&format!(
        "  Description: {}\n",
        record
            .summary
            .description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or(MISSING)
    ));
    out.push_str(&dim(
        &format!(
            "  Source:      {}.wikipedia / {}",
            record.summary_source.lang, record.summary_source.title
        ),
        opts,
    ));
    out.push('\n');

    if let Some(extract) = record.summary.extract.as_deref().filter(|e| !e.trim().is_empty()) {
        out.push('\n');
        let shown = if opts.full_extract {
            extract.trim()
        } else {
            first_paragraph(extract)
        };
        for line in shown.lines() {
            out.push_str(&format!("  {}\n", line));
        }
        if !opts.full_extract && shown.len() < extract.trim().len() {
            out.push_str(&dim("  (use --full for the complete extract)", opts));
            out.push('\n');
        }
    }

    out.push('\n');
    out.push_str(&heading("Details", opts));
    out.push('\n');
    let rows = fact_rows(record);
    let width = rows.iter().map(|(field, _)| field.len()).max().unwrap_or(0);
    for (field, value) in &rows {
        out.push_str(&format!("  {:<width$}  {}\n", field, value, width = width));
    }

    out.push('\n');
    out.push_str(&heading("TLE", opts));
    out.push('\n');
    match &record.catalog {
        Some(tle) => {
            for line in tle.lines() {
                out.push_str(line);
                out.push('\n');
            }
        }
        None => {
            out.push_str("  No TLE found in the orbital catalog. Retry with a NORAD catalog number (e.g. 20580).\n");
        }
    }

    out
}
