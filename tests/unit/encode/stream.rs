use super::*;
use byteorder::{ByteOrder, LittleEndian};

fn u32_at(buf: &[u8], offset: usize) -> u32 {
    LittleEndian::read_u32(&buf[offset..offset + 4])
}

fn i32_at(buf: &[u8], offset: usize) -> i32 {
    LittleEndian::read_i32(&buf[offset..offset + 4])
}

fn u16_at(buf: &[u8], offset: usize) -> u16 {
    LittleEndian::read_u16(&buf[offset..offset + 2])
}

fn stream_with_frames(fps: u32, width: u32, height: u32, frames: usize) -> Stream {
    let mut s = Stream::new(fps, width, height).unwrap();
    for i in 0..frames {
        let rgba = vec![i as u8; (width * height * 4) as usize];
        s.push_rgba(&rgba).unwrap();
    }
    s
}

#[test]
fn chunk_ids_zero_pad_below_ten() {
    assert_eq!(stream_chunk_id(0).unwrap().as_bytes(), b"00db");
    assert_eq!(stream_chunk_id(7).unwrap().as_bytes(), b"07db");
}

#[test]
fn chunk_ids_use_decimal_digits_from_ten() {
    // Legacy scheme: decimal, not hexadecimal ("0adb").
    assert_eq!(stream_chunk_id(10).unwrap().as_bytes(), b"10db");
    assert_eq!(stream_chunk_id(42).unwrap().as_bytes(), b"42db");
    assert_eq!(stream_chunk_id(99).unwrap().as_bytes(), b"99db");
    assert!(stream_chunk_id(100).is_err());
}

#[test]
fn new_rejects_zero_values() {
    assert!(Stream::new(0, 4, 2).is_err());
    assert!(Stream::new(25, 0, 2).is_err());
    assert!(Stream::new(25, 4, 0).is_err());
}

#[test]
fn push_rejects_wrong_frame_length() {
    let mut s = Stream::new(25, 4, 2).unwrap();
    let err = s.push_rgba(&[0u8; 31]).unwrap_err();
    assert!(err.to_string().contains("expected 32"));
    assert!(s.push_frame(Frame::from_bgrx(vec![0; 33])).is_err());
    assert_eq!(s.frame_count(), 0);
}

#[test]
fn header_len_is_fixed_part_plus_eight_per_frame() {
    assert_eq!(STREAM_HEADER_FIXED_LEN, 156);
    assert_eq!(stream_with_frames(25, 4, 2, 0).header_len(), 156);
    assert_eq!(stream_with_frames(25, 4, 2, 1).header_len(), 164);
    assert_eq!(stream_with_frames(25, 4, 2, 5).header_len(), 196);
}

#[test]
fn odd_frame_budgets_a_pad_byte() {
    let mut s = Stream::new(25, 1, 1).unwrap();
    s.frames.push(Frame::from_bgrx(vec![1, 2, 3]));
    assert_eq!(s.data_len(), 8 + 3 + 1);
}

#[test]
fn odd_frames_are_padded_on_write_and_indexed_past_the_pad() {
    let mut s = Stream::new(25, 1, 1).unwrap();
    s.frames.push(Frame::from_bgrx(vec![1, 2, 3]));
    s.frames.push(Frame::from_bgrx(vec![4, 5, 6, 7]));
    let id = stream_chunk_id(0).unwrap();

    let mut buf = vec![0xeeu8; s.data_len()];
    let written = s.write_data(&mut buf, id);
    assert_eq!(written, s.data_len());
    assert_eq!(written, 12 + 12);

    assert_eq!(&buf[0..4], b"00db");
    assert_eq!(u32_at(&buf, 4), 3);
    assert_eq!(&buf[8..11], &[1, 2, 3]);
    assert_eq!(buf[11], 0, "pad byte");
    assert_eq!(&buf[12..16], b"00db");
    assert_eq!(u32_at(&buf, 16), 4);
    assert_eq!(&buf[20..24], &[4, 5, 6, 7]);

    let entries = s.index_entries().unwrap();
    assert_eq!(
        entries,
        vec![
            IndexEntry { offset: 0, size: 11 },
            IndexEntry {
                offset: 12,
                size: 12
            }
        ]
    );
    assert_eq!(&buf[entries[1].offset as usize..][..4], b"00db");
}

#[test]
fn header_fields_match_stream_parameters() {
    let s = stream_with_frames(30, 4, 2, 2);
    let id = stream_chunk_id(3).unwrap();
    let mut buf = vec![0u8; s.header_len()];
    let written = s.write_header(&mut buf, id, 1234);
    assert_eq!(written, s.header_len());

    assert_eq!(&buf[0..4], b"LIST");
    assert_eq!(u32_at(&buf, 4) as usize, s.header_len() - 8);
    assert_eq!(u32_at(&buf, 4), 148 + 16);
    assert_eq!(&buf[8..12], b"strl");

    let strh = 12;
    assert_eq!(&buf[strh..strh + 4], b"strh");
    assert_eq!(u32_at(&buf, strh + 4), 56);
    let p = strh + 8;
    assert_eq!(&buf[p..p + 4], b"vids");
    assert_eq!(&buf[p + 4..p + 8], b"DIB ");
    assert_eq!(u16_at(&buf, p + 12), 1);
    assert_eq!(u32_at(&buf, p + 20), 1);
    assert_eq!(u32_at(&buf, p + 24), 30);
    assert_eq!(u32_at(&buf, p + 32), 2);
    assert_eq!(u32_at(&buf, p + 36), 4 * 2 * 4 + 8);
    assert_eq!(i32_at(&buf, p + 40), -1);
    assert_eq!(u16_at(&buf, p + 52), 4);
    assert_eq!(u16_at(&buf, p + 54), 2);

    let strf = p + 56;
    assert_eq!(&buf[strf..strf + 4], b"strf");
    assert_eq!(u32_at(&buf, strf + 4), 40);
    let p = strf + 8;
    assert_eq!(u32_at(&buf, p), 40);
    assert_eq!(i32_at(&buf, p + 4), 4);
    assert_eq!(i32_at(&buf, p + 8), -2);
    assert_eq!(u16_at(&buf, p + 12), 1);
    assert_eq!(u16_at(&buf, p + 14), 32);
    assert!(buf[p + 16..p + 40].iter().all(|&b| b == 0));

    let indx = p + 40;
    assert_eq!(&buf[indx..indx + 4], b"indx");
    assert_eq!(u32_at(&buf, indx + 4), 24 + 2 * 8);
    let p = indx + 8;
    assert_eq!(u16_at(&buf, p), 2);
    assert_eq!(buf[p + 2], 0);
    assert_eq!(buf[p + 3], 1);
    assert_eq!(u32_at(&buf, p + 4), 2);
    assert_eq!(&buf[p + 8..p + 12], b"03db");
    assert_eq!(u32_at(&buf, p + 12), 1234);
    assert_eq!(u32_at(&buf, p + 16), 0);
    let entries = p + 24;
    assert_eq!(u32_at(&buf, entries), 0);
    assert_eq!(u32_at(&buf, entries + 4), 40);
    assert_eq!(u32_at(&buf, entries + 8), 40);
    assert_eq!(u32_at(&buf, entries + 12), 40);
    assert_eq!(entries + 16, written);
}

#[test]
fn write_data_copies_frames_in_order() {
    let s = stream_with_frames(25, 1, 1, 3);
    let mut buf = vec![0u8; s.data_len()];
    let id = stream_chunk_id(1).unwrap();
    assert_eq!(s.write_data(&mut buf, id), 3 * 12);
    for (i, chunk) in buf.chunks(12).enumerate() {
        assert_eq!(&chunk[0..4], b"01db");
        assert_eq!(u32_at(chunk, 4), 4);
        // RGBA (i, i, i, i) stored as BGR + zero.
        assert_eq!(&chunk[8..12], &[i as u8, i as u8, i as u8, 0]);
    }
}

#[test]
fn index_entries_reject_values_past_32_bits() {
    let last = IndexEntry::new(u32::MAX as usize, u32::MAX as usize - 8).unwrap();
    assert_eq!(last.offset, u32::MAX);
    assert_eq!(last.size, u32::MAX);

    let err = IndexEntry::new(0, u32::MAX as usize - 7).unwrap_err();
    assert!(matches!(err, AviError::Layout(_)));
    assert!(matches!(
        IndexEntry::new(usize::MAX, 4),
        Err(AviError::Layout(_))
    ));
}
