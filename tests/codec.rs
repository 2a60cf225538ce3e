use relstore::codec;
use relstore::CodecError;

#[test]
fn integer_round_trips() {
    let mut buf = [0u8; 8];

    assert_eq!(codec::write_u8(&mut buf, 0, 0xAB).unwrap(), 1);
    assert_eq!(codec::read_u8(&buf, 0).unwrap(), 0xAB);

    assert_eq!(codec::write_i8(&mut buf, 0, -5).unwrap(), 1);
    assert_eq!(codec::read_i8(&buf, 0).unwrap(), -5);

    assert_eq!(codec::write_u16(&mut buf, 0, 0xBEEF).unwrap(), 2);
    assert_eq!(codec::read_u16(&buf, 0).unwrap(), 0xBEEF);

    assert_eq!(codec::write_i16(&mut buf, 0, -1234).unwrap(), 2);
    assert_eq!(codec::read_i16(&buf, 0).unwrap(), -1234);

    assert_eq!(codec::write_u32(&mut buf, 0, 0xDEADBEEF).unwrap(), 4);
    assert_eq!(codec::read_u32(&buf, 0).unwrap(), 0xDEADBEEF);

    assert_eq!(codec::write_i32(&mut buf, 0, i32::MIN).unwrap(), 4);
    assert_eq!(codec::read_i32(&buf, 0).unwrap(), i32::MIN);

    assert_eq!(codec::write_u64(&mut buf, 0, u64::MAX).unwrap(), 8);
    assert_eq!(codec::read_u64(&buf, 0).unwrap(), u64::MAX);

    assert_eq!(codec::write_i64(&mut buf, 0, i64::MIN).unwrap(), 8);
    assert_eq!(codec::read_i64(&buf, 0).unwrap(), i64::MIN);
}

#[test]
fn integers_are_big_endian() {
    let mut buf = [0u8; 4];
    codec::write_u32(&mut buf, 0, 0x01020304).unwrap();
    assert_eq!(buf, [0x01, 0x02, 0x03, 0x04]);

    let mut buf = [0u8; 2];
    codec::write_u16(&mut buf, 0, 0x0102).unwrap();
    assert_eq!(buf, [0x01, 0x02]);
}

#[test]
fn bool_round_trip() {
    let mut buf = [0u8; 1];
    codec::write_bool(&mut buf, 0, true).unwrap();
    assert_eq!(buf[0], 1);
    assert!(codec::read_bool(&buf, 0).unwrap());

    codec::write_bool(&mut buf, 0, false).unwrap();
    assert_eq!(buf[0], 0);
    assert!(!codec::read_bool(&buf, 0).unwrap());

    // readers accept any non-zero byte as true
    buf[0] = 0x7F;
    assert!(codec::read_bool(&buf, 0).unwrap());
}

#[test]
fn string_round_trip() {
    let mut buf = [0u8; 64];
    let written = codec::write_string(&mut buf, 3, "héllo").unwrap();
    assert_eq!(written, codec::string_size("héllo"));

    let (s, consumed) = codec::read_string(&buf, 3).unwrap();
    assert_eq!(s, "héllo");
    assert_eq!(consumed, written);
}

#[test]
fn empty_string_is_just_the_prefix() {
    let mut buf = [0u8; 8];
    assert_eq!(codec::write_string(&mut buf, 0, "").unwrap(), 4);
    let (s, consumed) = codec::read_string(&buf, 0).unwrap();
    assert_eq!(s, "");
    assert_eq!(consumed, 4);
}

#[test]
fn out_of_bounds_is_an_error_not_a_panic() {
    let mut buf = [0u8; 4];
    assert!(matches!(
        codec::write_u32(&mut buf, 1, 7),
        Err(CodecError::OutOfBounds { offset: 1, len: 4, buf_len: 4 })
    ));
    assert!(matches!(
        codec::read_u64(&buf, 0),
        Err(CodecError::OutOfBounds { .. })
    ));
    assert!(matches!(
        codec::read_u8(&buf, 4),
        Err(CodecError::OutOfBounds { .. })
    ));
}

#[test]
fn malformed_length_prefix_is_corrupt() {
    let mut buf = [0u8; 8];
    // negative length
    codec::write_i32(&mut buf, 0, -1).unwrap();
    assert!(matches!(
        codec::read_string(&buf, 0),
        Err(CodecError::Corrupt(_))
    ));

    // length exceeding the remaining buffer
    codec::write_i32(&mut buf, 0, 100).unwrap();
    assert!(matches!(
        codec::read_string(&buf, 0),
        Err(CodecError::OutOfBounds { .. })
    ));
}

#[test]
fn invalid_utf8_is_reported() {
    let mut buf = [0u8; 8];
    codec::write_i32(&mut buf, 0, 2).unwrap();
    buf[4] = 0xFF;
    buf[5] = 0xFE;
    assert!(matches!(
        codec::read_string(&buf, 0),
        Err(CodecError::Utf8(_))
    ));
}
