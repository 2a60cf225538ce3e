use relstore::row;
use relstore::{CodecError, Column, ColumnType, Row, Value};

fn schema() -> Vec<Column> {
    vec![
        Column::new("a", ColumnType::Int32, true),
        Column::new("b", ColumnType::Int64, true),
        Column::new("c", ColumnType::UInt32, true),
        Column::new("d", ColumnType::UInt64, true),
        Column::new("e", ColumnType::Bool, true),
        Column::new("f", ColumnType::Text, true),
    ]
}

fn full_row() -> Row {
    Row::new(vec![
        Value::Int32(-42),
        Value::Int64(1 << 40),
        Value::UInt32(7),
        Value::UInt64(u64::MAX),
        Value::Bool(true),
        Value::Text("hello".into()),
    ])
}

#[test]
fn round_trip_every_type() {
    let columns = schema();
    let row = full_row();
    let bytes = row::encode(&row, &columns).unwrap();
    assert_eq!(bytes.len(), row::encoded_size(&row, &columns).unwrap());
    assert_eq!(row::decode(&bytes, &columns).unwrap(), row);
}

#[test]
fn every_null_subset_survives() {
    let columns = schema();
    let base = full_row();
    // all 64 subsets of the six columns set null
    for mask in 0u32..64 {
        let mut row = base.clone();
        for i in 0..6 {
            if mask & (1 << i) != 0 {
                row.values[i] = Value::Null;
            }
        }
        let bytes = row::encode(&row, &columns).unwrap();
        assert_eq!(row::decode(&bytes, &columns).unwrap(), row, "mask {mask}");
    }
}

#[test]
fn null_text_writes_no_string_bytes() {
    let columns = vec![Column::new("t", ColumnType::Text, true)];
    let row = Row::new(vec![Value::Null]);
    let bytes = row::encode(&row, &columns).unwrap();
    // just the bitmap, no length prefix
    assert_eq!(bytes.len(), 4);
    assert_eq!(row::decode(&bytes, &columns).unwrap(), row);
}

#[test]
fn empty_row_is_the_bitmap_alone() {
    let row = Row::new(vec![]);
    let bytes = row::encode(&row, &[]).unwrap();
    assert_eq!(bytes, vec![0, 0, 0, 0]);
    assert_eq!(row::decode(&bytes, &[]).unwrap().values.len(), 0);
}

#[test]
fn cell_count_mismatch_rejected() {
    let columns = vec![Column::new("a", ColumnType::Int32, false)];
    let row = Row::new(vec![Value::Int32(1), Value::Int32(2)]);
    assert!(matches!(
        row::encode(&row, &columns),
        Err(CodecError::ColumnCountMismatch {
            expected: 1,
            got: 2
        })
    ));
}

#[test]
fn mismatched_value_type_rejected() {
    let columns = vec![Column::new("a", ColumnType::Int32, false)];
    let row = Row::new(vec![Value::Text("nope".into())]);
    assert!(matches!(
        row::encode(&row, &columns),
        Err(CodecError::Corrupt(_))
    ));
}

#[test]
fn trailing_bytes_are_corrupt() {
    let columns = vec![Column::new("a", ColumnType::Int32, false)];
    let row = Row::new(vec![Value::Int32(5)]);
    let mut bytes = row::encode(&row, &columns).unwrap();
    bytes.push(0);
    assert!(matches!(
        row::decode(&bytes, &columns),
        Err(CodecError::Corrupt(_))
    ));
}

#[test]
fn truncated_row_is_an_error() {
    let columns = schema();
    let bytes = row::encode(&full_row(), &columns).unwrap();
    assert!(matches!(
        row::decode(&bytes[..bytes.len() - 3], &columns),
        Err(CodecError::OutOfBounds { .. }) | Err(CodecError::Corrupt(_))
    ));
}
