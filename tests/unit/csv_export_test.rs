// CSV rendering rules for exports.
//
// Fields are quoted only when they contain a comma, and embedded
// quotes pass through unchanged.

use factura::modules::exports::services::csv_exporter::to_csv;

#[test]
fn test_header_row_comes_first() {
    let csv = to_csv(
        &["Name", "Email"],
        vec![vec!["Ada".to_string(), "ada@example.com".to_string()]],
    );

    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("Name,Email"));
    assert_eq!(lines.next(), Some("Ada,ada@example.com"));
    assert_eq!(lines.next(), None);
}

#[test]
fn test_comma_fields_are_quoted() {
    let csv = to_csv(
        &["Client", "City"],
        vec![vec!["Acme, Inc.".to_string(), "Berlin".to_string()]],
    );

    assert_eq!(csv, "Client,City\n\"Acme, Inc.\",Berlin\n");
}

#[test]
fn test_embedded_quotes_pass_through() {
    let csv = to_csv(
        &["Client"],
        vec![vec!["Joe \"The Builder\" Ltd".to_string()]],
    );

    assert_eq!(csv, "Client\nJoe \"The Builder\" Ltd\n");
}

#[test]
fn test_empty_fields_render_empty() {
    let csv = to_csv(
        &["Name", "Company", "Phone"],
        vec![vec!["Ada".to_string(), String::new(), String::new()]],
    );

    assert_eq!(csv, "Name,Company,Phone\nAda,,\n");
}

#[test]
fn test_no_rows_yields_header_only() {
    let csv = to_csv(&["A", "B"], Vec::<Vec<String>>::new());

    assert_eq!(csv, "A,B\n");
}
