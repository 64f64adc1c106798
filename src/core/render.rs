use std::io::{self, Write};

use serde_json::json;

use crate::core::BatchSummary;
use crate::models::ValidationReport;

pub fn write_text<W: Write>(writer: &mut W, reports: &[ValidationReport]) -> io::Result<()> {
    for report in reports {
        write_report(writer, report)?;
    }

    let summary = BatchSummary::from_reports(reports);
    if summary.all_ok() {
        writeln!(writer, "All repositories passed")?;
    } else {
        writeln!(
            writer,
            "Some repositories failed ({} of {})",
            summary.failed,
            summary.total()
        )?;
    }
    Ok(())
}

fn write_report<W: Write>(writer: &mut W, report: &ValidationReport) -> io::Result<()> {
    if report.ok {
        return writeln!(writer, "{}: OK", report.repository);
    }

    writeln!(
        writer,
        "{}: ### Repository {} not OK ###",
        report.checked_at.format("%Y-%m-%d"),
        report.repository
    )?;
    for discrepancy in &report.discrepancies {
        writeln!(writer, "    {discrepancy}")?;
    }
    Ok(())
}

pub fn write_json<W: Write>(writer: &mut W, reports: &[ValidationReport]) -> io::Result<()> {
    let summary = BatchSummary::from_reports(reports);
    let repositories: Vec<_> = reports
        .iter()
        .map(|report| {
            json!({
                "repository": report.repository,
                "root": report.root.display().to_string(),
                "checked_at": report.checked_at.to_rfc3339(),
                "ok": report.ok,
                "messages": report.messages(),
                "discrepancies": report
                    .discrepancies
                    .iter()
                    .map(|d| json!({ "kind": d.kind(), "message": d.to_string() }))
                    .collect::<Vec<_>>(),
            })
        })
        .collect();

    let document = json!({
        "repositories": repositories,
        "summary": {
            "ok": summary.all_ok(),
            "passed": summary.passed,
            "failed": summary.failed,
        },
    });

    serde_json::to_writer_pretty(&mut *writer, &document)?;
    writeln!(writer)
}
