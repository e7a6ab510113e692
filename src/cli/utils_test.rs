use crate::cli::utils::*;
use crate::sync::{Domain, ExportOutcome, SyncReport, TableReport};

fn report() -> SyncReport {
    SyncReport {
        domain: Domain::Tracks,
        tables: vec![TableReport {
            table: "tracks".to_string(),
            outcome: ExportOutcome::Skipped,
        }],
        held_back: vec!["module_track".to_string()],
    }
}

#[test]
fn test_format_report_skipped_and_held_back() {
    let output = format_report(&report());

    assert!(output.starts_with("Tracks\n"));
    assert!(output.contains("tracks"));
    assert!(output.contains("✗ skipped"));
    assert!(output.contains("module_track"));
    assert!(output.contains("not synced (primary skipped)"));
    assert!(output.contains("0 synced"));
}

#[test]
fn test_format_report_synced_rows_and_total() {
    let report = SyncReport {
        domain: Domain::Modules,
        tables: vec![
            TableReport {
                table: "modules".to_string(),
                outcome: ExportOutcome::Synced { rows: 12 },
            },
            TableReport {
                table: "module_resource".to_string(),
                outcome: ExportOutcome::Synced { rows: 30 },
            },
        ],
        held_back: vec![],
    };

    let output = format_report(&report);

    assert!(output.contains("✓ synced"));
    assert!(output.contains("12"));
    assert!(output.contains("42"));
    assert!(output.contains("2 synced"));
}

#[test]
fn test_format_report_uses_rounded_style() {
    let output = format_report(&report());
    assert!(output.contains('╭'));
    assert!(output.contains('╯'));
}
