use super::*;

#[test]
fn both_mime_spellings_are_accepted() {
    assert!(is_avi_mime("video/avi"));
    assert!(is_avi_mime("video/msvideo"));
    assert!(is_avi_mime(" Video/AVI "));
    assert!(!is_avi_mime("video/mp4"));
}

#[test]
fn blob_exposes_bytes_and_mime() {
    let blob = AviBlob::new(b"RIFF".to_vec());
    assert_eq!(blob.mime_type(), "video/avi");
    assert_eq!(blob.len(), 4);
    assert!(!blob.is_empty());
    assert_eq!(blob.as_ref(), b"RIFF");
    assert_eq!(format!("{blob:?}"), "AviBlob { mime: \"video/avi\", len: 4 }");
    assert_eq!(blob.into_bytes(), b"RIFF".to_vec());
}

#[test]
fn blob_serializes_with_its_mime_type() {
    let blob = AviBlob::new(vec![b'R', 0, 255]);
    assert_eq!(
        serde_json::to_string(&blob).unwrap(),
        r#"{"mime_type":"video/avi","bytes":[82,0,255]}"#
    );
}
