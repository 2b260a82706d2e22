use proptest::prelude::*;
use rusty_sift::data::encoding::TextEncoding;
use rusty_sift::data::error::ReadError;
use rusty_sift::data::{delimited, spreadsheet};
use rusty_sift::{
    apply_filter, ingest, Cell, ColumnKind, FilterSpec, IngestError, IngestOptions, Table,
};

fn encode(text: &str, encoding: TextEncoding) -> Vec<u8> {
    match encoding {
        TextEncoding::Utf8 => text.as_bytes().to_vec(),
        TextEncoding::Iso8859_1 | TextEncoding::Latin1 => text
            .chars()
            .map(|c| u8::try_from(u32::from(c)).expect("latin-1 text"))
            .collect(),
        TextEncoding::Windows1252 => {
            let (bytes, _, had_errors) = encoding_rs::WINDOWS_1252.encode(text);
            assert!(!had_errors, "text not representable in cp1252");
            bytes.into_owned()
        }
        TextEncoding::Utf16 => {
            let mut out = vec![0xFF, 0xFE];
            for unit in text.encode_utf16() {
                out.extend_from_slice(&unit.to_le_bytes());
            }
            out
        }
    }
}

fn to_csv(names: &[&str], rows: &[Vec<&str>]) -> String {
    let mut out = names.join(",");
    out.push('\n');
    for row in rows {
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}

fn expected_table(names: &[&str], rows: &[Vec<&str>]) -> Table {
    Table::from_rows(
        names.iter().map(|s| s.to_string()).collect(),
        rows.iter()
            .map(|r| r.iter().map(|v| Cell::from(*v)).collect())
            .collect(),
    )
    .unwrap()
}

// ---------------------------------------------------------------------------
// End-to-end
// ---------------------------------------------------------------------------

#[test]
fn csv_end_to_end_literal_case() {
    let table = ingest(b"a,b\n1,2\n3,x\n", "d.csv").unwrap();
    assert_eq!(table.column_names(), vec!["a", "b"]);
    assert_eq!(
        table.column("a").unwrap().cells,
        vec![Cell::Number(1.0), Cell::Number(3.0)]
    );
    assert_eq!(
        table.column("b").unwrap().cells,
        vec![Cell::Number(2.0), Cell::Missing]
    );
    assert_eq!(table.numeric_columns(), vec!["a", "b"]);
}

#[test]
fn unsupported_suffix_fails_for_any_content() {
    for bytes in [&b""[..], b"a,b\n1,2\n", b"[1,2]", b"\xFF\xFE\x00"] {
        let err = ingest(bytes, "notes.txt").unwrap_err();
        match err {
            IngestError::UnsupportedFormat(e) => assert_eq!(e.filename, "notes.txt"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
    assert!(matches!(
        ingest(b"", "no_extension"),
        Err(IngestError::UnsupportedFormat(_))
    ));
}

#[test]
fn read_failures_are_typed_and_terminal() {
    // Even length: plain ASCII must not be rescued as UTF-16 either.
    for bytes in [&b"a,b\n1,2,3\n"[..], b"a,b\n1,2,3\n\n"] {
        let err = ingest(bytes, "bad.csv").unwrap_err();
        assert!(
            matches!(err, IngestError::Read(ReadError::NoEncodingWorked { .. })),
            "{err:?}"
        );
    }

    let err = ingest(b"not a workbook", "book.xlsx").unwrap_err();
    assert!(matches!(err, IngestError::Read(ReadError::Spreadsheet(_))));
}

#[test]
fn utf8_with_control_characters_is_read_as_utf8() {
    let table = ingest("name,v\nCafé\u{85},1\nab\u{0}c,2\n".as_bytes(), "c.csv").unwrap();
    assert_eq!(table.column_names(), vec!["name", "v"]);
    assert_eq!(
        table.column("name").unwrap().cells,
        vec![Cell::from("Café\u{85}"), Cell::from("ab\u{0}c")]
    );
    assert_eq!(
        table.column("v").unwrap().cells,
        vec![Cell::Number(1.0), Cell::Number(2.0)]
    );
}

// ---------------------------------------------------------------------------
// Spreadsheets
// ---------------------------------------------------------------------------

/// Write a one-sheet workbook and return its bytes.
fn build_workbook(fill: impl FnOnce(&mut umya_spreadsheet::Worksheet)) -> Vec<u8> {
    let mut book = umya_spreadsheet::new_file();
    fill(book.get_sheet_by_name_mut("Sheet1").unwrap());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.xlsx");
    umya_spreadsheet::writer::xlsx::write(&book, &path).unwrap();
    std::fs::read(&path).unwrap()
}

#[test]
fn xlsx_end_to_end() {
    let bytes = build_workbook(|sheet| {
        sheet.get_cell_mut((1, 1)).set_value("a");
        sheet.get_cell_mut((2, 1)).set_value("b");
        sheet.get_cell_mut((3, 1)).set_value("city");
        sheet.get_cell_mut((1, 2)).set_value_number(1.0);
        sheet.get_cell_mut((2, 2)).set_value("2");
        sheet.get_cell_mut((3, 2)).set_value("Zürich");
        sheet.get_cell_mut((1, 3)).set_value_number(3.5);
        sheet.get_cell_mut((2, 3)).set_value("x");
        sheet.get_cell_mut((3, 3)).set_value("Kraków");
    });

    let table = ingest(&bytes, "Book.XLSX").unwrap();
    assert_eq!(table.column_names(), vec!["a", "b", "city"]);
    assert_eq!(
        table.column("a").unwrap().cells,
        vec![Cell::Number(1.0), Cell::Number(3.5)]
    );
    assert_eq!(
        table.column("b").unwrap().cells,
        vec![Cell::Number(2.0), Cell::Missing]
    );
    assert_eq!(
        table.column("city").unwrap().cells,
        vec![Cell::from("Zürich"), Cell::from("Kraków")]
    );
    assert_eq!(table.numeric_columns(), vec!["a", "b"]);
}

#[test]
fn xlsx_reader_reads_first_sheet_only() {
    let bytes = build_workbook(|sheet| {
        sheet.get_cell_mut((1, 1)).set_value("only");
        sheet.get_cell_mut((1, 2)).set_value("row");
    });
    let table = spreadsheet::read(&bytes).unwrap();
    assert_eq!(table.shape(), (1, 1));
    assert_eq!(table.column("only").unwrap().cells, vec![Cell::from("row")]);
}

// ---------------------------------------------------------------------------
// JSON shapes
// ---------------------------------------------------------------------------

#[test]
fn json_list_of_flat_objects() {
    let doc = br#"[
        {"city": "Oslo", "temp": "4"},
        {"city": "Lima", "rain": 12},
        {"temp": 30, "city": "Cairo"}
    ]"#;
    let table = ingest(doc, "weather.json").unwrap();
    assert_eq!(table.len(), 3);
    assert_eq!(table.column_names(), vec!["city", "temp", "rain"]);
    assert_eq!(
        table.column("temp").unwrap().cells,
        vec![Cell::Number(4.0), Cell::Missing, Cell::Number(30.0)]
    );
    assert_eq!(table.column_kind("city"), Some(ColumnKind::Text));
}

#[test]
fn json_object_with_one_list_field_discards_siblings() {
    let doc = br#"{"status": "ok", "page": 1, "data": [{"x": 1}, {"x": 2}, {"x": 3}]}"#;
    let table = ingest(doc, "api.json").unwrap();
    assert_eq!(table.column_names(), vec!["x"]);
    assert_eq!(table.len(), 3);
}

// ---------------------------------------------------------------------------
// Range filter
// ---------------------------------------------------------------------------

#[test]
fn filter_bounds_behave() {
    let table = ingest(b"v,name\n10,a\n20,b\n30,c\n", "f.csv").unwrap();

    let full = FilterSpec::full_range(&table, "v").unwrap();
    assert_eq!(apply_filter(&table, &full), *table);

    assert!(apply_filter(&table, &FilterSpec::new("v", 31.0, 40.0)).is_empty());
    assert!(apply_filter(&table, &FilterSpec::new("v", 0.0, 9.0)).is_empty());

    let middle = apply_filter(&table, &FilterSpec::new("v", 15.0, 30.0));
    assert_eq!(
        middle.column("name").unwrap().cells,
        vec![Cell::from("b"), Cell::from("c")]
    );

    assert_eq!(apply_filter(&table, &FilterSpec::new("name", 0.0, 1.0)), *table);
    assert_eq!(apply_filter(&table, &FilterSpec::new("nope", 0.0, 1.0)), *table);
}

// ---------------------------------------------------------------------------
// Encoding round-trips for delimited text
// ---------------------------------------------------------------------------

#[test]
fn csv_round_trips_in_every_candidate_encoding() {
    let names = ["name", "city"];
    let latin_rows = vec![vec!["José", "Zürich"], vec!["Zoë", "Besançon"]];
    let cp1252_rows = vec![vec!["price €", "naïve"], vec!["„quote“", "œuvre"]];

    let cases = [
        (TextEncoding::Utf8, &latin_rows),
        (TextEncoding::Utf8, &cp1252_rows),
        (TextEncoding::Iso8859_1, &latin_rows),
        (TextEncoding::Latin1, &latin_rows),
        (TextEncoding::Windows1252, &cp1252_rows),
        (TextEncoding::Utf16, &latin_rows),
        (TextEncoding::Utf16, &cp1252_rows),
    ];

    for (encoding, rows) in cases {
        let bytes = encode(&to_csv(&names, rows), encoding);
        let (chosen, table) = delimited::read(&bytes, &IngestOptions::default())
            .unwrap_or_else(|e| panic!("{encoding}: {e}"));
        // Latin1 bytes are identical to ISO-8859-1, which is tried first.
        let expected_encoding = match encoding {
            TextEncoding::Latin1 => TextEncoding::Iso8859_1,
            other => other,
        };
        assert_eq!(chosen, expected_encoding, "{encoding}");
        assert_eq!(table, expected_table(&names, rows), "{encoding}");
    }
}

proptest! {
    #[test]
    fn proptest_csv_round_trip_latin_text(
        cells in prop::collection::vec(("[éüñç][a-zA-Z ]{0,7}", "[àöß][a-zA-Z]{0,7}"), 1..6),
        utf16 in any::<bool>(),
    ) {
        let rows: Vec<Vec<&str>> = cells.iter().map(|(a, b)| vec![a.as_str(), b.as_str()]).collect();
        let names = ["left", "right"];
        let encoding = if utf16 { TextEncoding::Utf16 } else { TextEncoding::Iso8859_1 };
        let bytes = encode(&to_csv(&names, &rows), encoding);
        let (chosen, table) = delimited::read(&bytes, &IngestOptions::default()).unwrap();
        prop_assert_eq!(chosen, encoding);
        prop_assert_eq!(table, expected_table(&names, &rows));
    }
}
