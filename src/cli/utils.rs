//! Report rendering.

use tabled::{Table, Tabled, settings::Style};

use crate::sync::{ExportOutcome, SyncReport};

#[derive(Tabled)]
struct ReportRow {
    #[tabled(rename = "Table")]
    table: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Rows")]
    rows: String,
}

/// Apply consistent table styling
pub fn apply_table_style(table: &mut Table) {
    table.with(Style::rounded());
}

/// Render a run's per-table outcomes as a table.
pub fn format_report(report: &SyncReport) -> String {
    let mut rows: Vec<ReportRow> = report
        .tables
        .iter()
        .map(|entry| match entry.outcome {
            ExportOutcome::Synced { rows } => ReportRow {
                table: entry.table.clone(),
                status: "✓ synced".to_string(),
                rows: rows.to_string(),
            },
            ExportOutcome::Skipped => ReportRow {
                table: entry.table.clone(),
                status: "✗ skipped".to_string(),
                rows: "-".to_string(),
            },
        })
        .collect();

    rows.extend(report.held_back.iter().map(|table| ReportRow {
        table: table.clone(),
        status: "✗ not synced (primary skipped)".to_string(),
        rows: "-".to_string(),
    }));

    rows.push(ReportRow {
        table: "Total".to_string(),
        status: format!("{} synced", report.synced().len()),
        rows: report.total_rows().to_string(),
    });

    let mut table = Table::new(rows);
    apply_table_style(&mut table);
    format!("{}\n{}", report.domain, table)
}
