// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::*;

#[test]
fn test_parse_rows_with_all_columns() {
    let csv = "Name,profile,mail\n\
               Ada Lovelace,https://example.com/u/ada,ada@example.com\n\
               Alan Turing,https://example.com/u/alan,\n";

    let rows = parse_upload("participants.csv", csv.as_bytes()).unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].row_number, 2);
    assert_eq!(rows[0].name, "Ada Lovelace");
    assert_eq!(rows[0].profile_url.as_deref(), Some("https://example.com/u/ada"));
    assert_eq!(rows[0].email.as_deref(), Some("ada@example.com"));
    assert_eq!(rows[1].row_number, 3);
    assert_eq!(rows[1].email, None);
}

#[test]
fn test_parse_rows_without_optional_email_column() {
    let csv = "profile,Name\nhttps://example.com/u/1,First\n";
    let rows = parse_rows(csv.as_bytes()).unwrap();
    assert_eq!(rows[0].name, "First");
    assert_eq!(rows[0].email, None);
}

#[test]
fn test_missing_required_columns_are_reported_together() {
    let err = parse_rows(b"name,url\nAda,https://example.com\n").unwrap_err();
    assert_eq!(
        err,
        CsvError::MissingColumns(vec!["Name".to_string(), "profile".to_string()])
    );
    assert_eq!(err.to_string(), "Missing required columns: Name, profile");
}

#[test]
fn test_missing_names_report_spreadsheet_rows() {
    let csv = "Name,profile\nAda,https://a\n,https://b\nAlan,https://c\n ,https://d\n";
    let err = parse_rows(csv.as_bytes()).unwrap_err();
    assert_eq!(err, CsvError::MissingNames(vec![3, 5]));
    assert_eq!(
        err.to_string(),
        "Missing values in 'Name' column at rows: 3, 5"
    );
}

#[test]
fn test_empty_profile_is_kept_without_url() {
    let csv = "Name,profile\nAda,\n";
    let rows = parse_rows(csv.as_bytes()).unwrap();
    assert_eq!(rows[0].profile_url, None);
}

#[test]
fn test_short_rows_and_blank_lines_are_tolerated() {
    let csv = "Name,profile,mail\nAda\n\n,,\nAlan,https://example.com/alan\n";
    let rows = parse_rows(csv.as_bytes()).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].name, "Ada");
    assert_eq!(rows[0].profile_url, None);
    assert_eq!(rows[1].name, "Alan");
}

#[test]
fn test_bom_and_padded_headers() {
    let csv = "\u{feff} Name , profile \nAda,https://example.com/ada\n";
    let rows = parse_rows(csv.as_bytes()).unwrap();
    assert_eq!(rows[0].name, "Ada");
}

#[test]
fn test_quoted_fields() {
    let csv = "Name,profile\n\"Lovelace, Ada\",\"https://example.com/ada\"\n";
    let rows = parse_rows(csv.as_bytes()).unwrap();
    assert_eq!(rows[0].name, "Lovelace, Ada");
}

#[test]
fn test_header_only_file_is_empty() {
    assert_eq!(parse_rows(b"Name,profile\n").unwrap_err(), CsvError::Empty);
}

#[test]
fn test_invalid_utf8_is_rejected() {
    assert_eq!(
        parse_rows(&[0x4e, 0x61, 0xff, 0xfe, 0x0a]).unwrap_err(),
        CsvError::Encoding
    );
}

#[test]
fn test_file_name_checks() {
    assert_eq!(check_file_name(""), Err(CsvError::NoFileSelected));
    assert_eq!(check_file_name("people.xlsx"), Err(CsvError::NotCsv));
    assert!(check_file_name("People.CSV").is_ok());
}

#[test]
fn test_unterminated_quote_is_malformed() {
    let csv = "Name,profile\nAda,\"https://x.test/u/ada\nAlan,https://x.test/u/alan\n";
    let err = parse_rows(csv.as_bytes()).unwrap_err();
    assert_eq!(
        err,
        CsvError::Malformed("unterminated quoted field starting at line 2".to_string())
    );
    assert_eq!(
        err.to_string(),
        "Error validating CSV: unterminated quoted field starting at line 2"
    );
}

#[test]
fn test_escaped_and_multiline_quotes_are_accepted() {
    let csv = "Name,profile,mail\n\"Ada \"\"The Countess\"\"\",https://x.test/u/ada,\n\"Alan\nTuring\",https://x.test/u/alan,\r\nGrace,,\n";
    let rows = parse_rows(csv.as_bytes()).unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].name, "Ada \"The Countess\"");
    assert_eq!(rows[1].name, "Alan\nTuring");
    assert_eq!(rows[2].name, "Grace");
}

#[test]
fn test_quote_inside_unquoted_field_is_literal() {
    let csv = "Name,profile\nAda 5\" tall,https://x.test/u/ada\n";
    let rows = parse_rows(csv.as_bytes()).unwrap();
    assert_eq!(rows[0].name, "Ada 5\" tall");
}
