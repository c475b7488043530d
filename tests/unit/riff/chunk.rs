use super::*;

#[test]
fn odd_payloads_budget_one_pad_byte() {
    assert_eq!(chunk_len(3), 8 + 3 + 1);
    assert_eq!(chunk_len(32), 8 + 32);
    assert_eq!(chunk_len(0), 8);
    assert_eq!(padded_len(1), 2);
}

#[test]
fn chunk_header_records_unpadded_length() {
    let mut buf = [0u8; 8];
    let n = write_chunk_header(&mut buf, 0, ids::STRH, 3);
    assert_eq!(n, CHUNK_HEADER_LEN);
    assert_eq!(&buf, b"strh\x03\0\0\0");
}

#[test]
fn list_header_layout() {
    let mut buf = [0u8; 14];
    let n = write_list_header(&mut buf, 2, ids::HDRL, 68);
    assert_eq!(n, LIST_HEADER_LEN);
    assert_eq!(&buf[2..], b"LIST\x44\0\0\0hdrl");
}
