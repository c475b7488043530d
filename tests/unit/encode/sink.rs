use super::*;

fn cfg() -> SinkConfig {
    SinkConfig {
        width: 2,
        height: 2,
        fps: 12,
    }
}

fn solid(width: u32, height: u32, v: u8) -> RgbaFrame {
    RgbaFrame {
        width,
        height,
        data: vec![v; (width * height * 4) as usize],
    }
}

#[test]
fn collects_frames_into_one_stream() {
    let mut sink = AviSink::new();
    sink.begin(cfg()).unwrap();
    for i in 0..3 {
        sink.push_frame(FrameIndex(i), &solid(2, 2, i as u8)).unwrap();
    }
    sink.end().unwrap();

    let blob = sink.take_blob().unwrap();
    // 100 container + (156 + 3*8) header + 3 * (8 + 16) data.
    assert_eq!(blob.len(), 100 + 180 + 72);
    assert_eq!(&blob.as_bytes()[0..4], b"RIFF");
    assert_eq!(sink.config(), Some(cfg()));
    assert!(sink.take_blob().is_none());
}

#[test]
fn rejects_out_of_order_frames() {
    let mut sink = AviSink::new();
    sink.begin(cfg()).unwrap();
    sink.push_frame(FrameIndex(3), &solid(2, 2, 0)).unwrap();
    assert!(sink.push_frame(FrameIndex(3), &solid(2, 2, 0)).is_err());
    assert!(sink.push_frame(FrameIndex(1), &solid(2, 2, 0)).is_err());
    sink.push_frame(FrameIndex(4), &solid(2, 2, 0)).unwrap();
}

#[test]
fn rejects_mismatched_dimensions() {
    let mut sink = AviSink::new();
    sink.begin(cfg()).unwrap();
    let err = sink
        .push_frame(FrameIndex(0), &solid(4, 1, 0))
        .unwrap_err();
    assert!(err.to_string().contains("expected 2x2"));
}

#[test]
fn requires_begin() {
    let mut sink = AviSink::new();
    assert!(sink.push_frame(FrameIndex(0), &solid(2, 2, 0)).is_err());
    assert!(sink.end().is_err());
}

#[test]
fn begin_validates_config() {
    let mut sink = AviSink::new();
    assert!(
        sink.begin(SinkConfig {
            width: 2,
            height: 2,
            fps: 0
        })
        .is_err()
    );
    assert!(
        sink.begin(SinkConfig {
            width: 0,
            height: 2,
            fps: 30
        })
        .is_err()
    );
}
