use crate::analyzer::Analysis;
use crate::classifier::{RankedItem, Summary};
use crate::error::{AnalyzerError, Result};
use colored::Colorize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

const SEPARATOR: &str =
    "════════════════════════════════════════════════════════════════════";
const THIN_SEP: &str =
    "────────────────────────────────────────────────────────────────────";

/// Width of the address column in the terminal report
const ADDRESS_WIDTH: usize = 20;

/// Write the human-readable report
pub fn write_report<W: Write>(out: &mut W, analysis: &Analysis) -> io::Result<()> {
    let summary = &analysis.summary;

    writeln!(out, "\n{}", SEPARATOR.cyan().bold())?;
    writeln!(out, "{}", "  ACCESS LOG ANALYSIS".white().bold())?;
    writeln!(out, "{}", SEPARATOR.cyan().bold())?;
    writeln!(out, "  Source           : {}", analysis.source.yellow())?;
    writeln!(out, "  Lines read       : {}", analysis.lines_read.to_string().green().bold())?;
    if analysis.unreadable_lines > 0 {
        writeln!(
            out,
            "  Unreadable lines : {}",
            analysis.unreadable_lines.to_string().yellow().bold()
        )?;
    }
    writeln!(out)?;

    // ── Requests per address ─────────────────────────────────────────────────
    section_header(out, "Requests per IP Address:")?;
    if summary.requests_per_address.is_empty() {
        writeln!(out, "  (no data)")?;
    } else {
        write_table(out, &summary.requests_per_address, "Request Count", |s| s.cyan())?;
    }
    writeln!(out)?;

    // ── Top endpoint ─────────────────────────────────────────────────────────
    section_header(out, "Most Frequently Accessed Endpoint:")?;
    let (endpoint, count) = summary.top_endpoint();
    writeln!(out, "  {} (Accessed {} times)", endpoint.cyan(), count)?;
    writeln!(out)?;

    // ── Suspicious activity ──────────────────────────────────────────────────
    section_header(out, "Suspicious Activity Detected:")?;
    if summary.suspicious_activity.is_empty() {
        writeln!(
            out,
            "  {} No IP exceeded {} failed login attempts.",
            "✓".green(),
            summary.failed_login_threshold
        )?;
    } else {
        write_table(out, &summary.suspicious_activity, "Failed Login Attempts", |s| {
            s.red().bold()
        })?;
    }

    writeln!(out, "\n{}\n", SEPARATOR.cyan())
}

/// Print the human-readable report to stdout
pub fn print_report(analysis: &Analysis) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, analysis)?;
    out.flush()
}

/// Write the three-section CSV record: requests per address, the most
/// accessed endpoint, then suspicious addresses, separated by blank rows.
pub fn write_csv<W: Write>(out: &mut W, summary: &Summary) -> std::result::Result<(), csv::Error> {
    write_csv_section(
        &mut *out,
        "Requests per IP",
        ["IP Address", "Request Count"],
        &summary.requests_per_address,
    )?;
    out.write_all(b"\n")?;

    let (endpoint, count) = summary.top_endpoint();
    let top = [RankedItem {
        value: endpoint.to_string(),
        count,
    }];
    write_csv_section(
        &mut *out,
        "Most Accessed Endpoint",
        ["Endpoint", "Access Count"],
        &top,
    )?;
    out.write_all(b"\n")?;

    write_csv_section(
        &mut *out,
        "Suspicious Activity",
        ["IP Address", "Failed Login Count"],
        &summary.suspicious_activity,
    )?;
    out.flush()?;
    Ok(())
}

pub fn export_csv(summary: &Summary, path: &Path) -> Result<()> {
    let to_error = |source: csv::Error| AnalyzerError::WriteCsv {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(|e| to_error(e.into()))?;
    let mut out = BufWriter::new(file);
    write_csv(&mut out, summary).map_err(to_error)
}

/// Export the full analysis as pretty-printed JSON
pub fn export_json(analysis: &Analysis, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|source| AnalyzerError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut out = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, analysis).map_err(|source| AnalyzerError::WriteJson {
        path: path.to_path_buf(),
        source,
    })?;
    out.flush().map_err(|source| AnalyzerError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn section_header<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out, "  {} {}", "▶".cyan(), title.white().bold())?;
    writeln!(out, "  {}", THIN_SEP)
}

fn write_table<W, F>(out: &mut W, rows: &[RankedItem], count_label: &str, paint: F) -> io::Result<()>
where
    W: Write,
    F: Fn(&str) -> colored::ColoredString,
{
    writeln!(out, "  {:<width$} {}", "IP Address", count_label, width = ADDRESS_WIDTH)?;
    for row in rows {
        // pad before painting so escape codes don't count toward the width
        let address = format!("{:<width$}", row.value, width = ADDRESS_WIDTH);
        writeln!(out, "  {} {}", paint(&address), row.count)?;
    }
    Ok(())
}

fn write_csv_section<W: Write>(
    out: W,
    title: &str,
    header: [&str; 2],
    rows: &[RankedItem],
) -> std::result::Result<(), csv::Error> {
    let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(out);
    writer.write_record([title])?;
    writer.write_record(header)?;
    for row in rows {
        writer.write_record([row.value.as_str(), row.count.to_string().as_str()])?;
    }
    writer.flush()?;
    Ok(())
}
