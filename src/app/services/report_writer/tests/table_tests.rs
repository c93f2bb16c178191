//! Tests for console table rendering

use super::*;
use crate::app::services::report_writer::table::{Align, Table};
use crate::app::services::report_writer::{
    format_number, node_label, rational_method_table, unit_hydrograph_table,
};

#[test]
fn test_format_number_rounds() {
    assert_eq!(format_number(4.26, 2), "4.26");
    assert_eq!(format_number(8.254, 2), "8.25");
    assert_eq!(format_number(17.0, 2), "17.00");
    assert_eq!(format_number(3.141, 0), "3");
    assert_eq!(format_number(0.66, 3), "0.660");
}

#[test]
fn test_node_label_marks_confluences() {
    let records = sample_rational_records();
    assert_eq!(node_label(&records[0]), "101-102");
    assert_eq!(node_label(&records[1]), "*103-103");
}

#[test]
fn test_rational_method_table() {
    let table = rational_method_table(&sample_rational_records(), 2);
    let expected = [
        "| Nodes    | Q (CFS) | TC (min) |",
        "|----------|---------|----------|",
        "| 101-102  |    4.26 |    17.00 |",
        "| *103-103 |    8.25 |    18.50 |",
    ]
    .join("\n");
    assert_eq!(table.render(), expected);
    assert_eq!(table.len(), 2);
}

#[test]
fn test_unit_hydrograph_table() {
    let table = unit_hydrograph_table(&sample_unit_hydrograph_records(), 1);
    let expected = [
        "| Filename | Peak flowrate (CFS) | Peak volume (Ac.ft) |",
        "|----------|---------------------|---------------------|",
        "| UH1.out  |                26.2 |                 5.2 |",
        "| UH2.out  |                 4.0 |                 0.7 |",
    ]
    .join("\n");
    assert_eq!(table.render(), expected);
}

#[test]
fn test_empty_table_renders_headers() {
    let table = Table::new(&[("Name", Align::Left), ("Value", Align::Right)]);
    assert!(table.is_empty());
    assert_eq!(table.render(), "| Name | Value |\n|------|-------|");
}

#[test]
fn test_rows_are_padded_to_column_count() {
    let mut table = Table::new(&[("A", Align::Left), ("B", Align::Right)]);
    table.push_row(vec!["x".to_string()]);
    assert_eq!(table.render(), "| A | B |\n|---|---|\n| x |   |");
}
