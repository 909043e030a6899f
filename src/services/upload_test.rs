use std::sync::Arc;

use super::*;

#[test]
fn mime_by_extension() {
    assert_eq!(image_mime(Path::new("a.PNG")), Some("image/png"));
    assert_eq!(image_mime(Path::new("a.jpeg")), Some("image/jpeg"));
    assert_eq!(image_mime(Path::new("a.svg")), Some("image/svg+xml"));
    assert_eq!(image_mime(Path::new("notes.txt")), None);
    assert_eq!(image_mime(Path::new("no_extension")), None);
}

#[test]
fn data_url_format() {
    assert_eq!(data_url("image/png", b"hi"), "data:image/png;base64,aGk=");
}

#[tokio::test]
async fn read_image_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pic.gif");
    std::fs::write(&path, b"GIF89a").unwrap();
    assert_eq!(read_as_data_url(&path).await.unwrap(), "data:image/gif;base64,R0lGODlh");
}

#[tokio::test]
async fn non_image_rejected_before_read() {
    let err = read_as_data_url(Path::new("/definitely/missing.txt")).await.unwrap_err();
    assert!(matches!(err, UploadError::UnsupportedType(_)));
}

#[tokio::test]
async fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_as_data_url(&dir.path().join("gone.png")).await.unwrap_err();
    assert!(matches!(err, UploadError::Io { .. }));
}

#[tokio::test]
async fn applies_to_live_target() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pic.png");
    std::fs::write(&path, b"hi").unwrap();

    let target = Arc::new(Mutex::new(String::new()));
    spawn_image_upload(Arc::downgrade(&target), path, |s: &mut String, url| *s = url)
        .await
        .unwrap();
    assert_eq!(*target.lock().unwrap(), "data:image/png;base64,aGk=");
}

#[tokio::test]
async fn dropped_target_is_a_quiet_no_op() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pic.png");
    std::fs::write(&path, b"hi").unwrap();

    let target = Arc::new(Mutex::new(String::new()));
    let weak = Arc::downgrade(&target);
    drop(target);
    let err = upload_into(&weak, &path, |s: &mut String, url| *s = url).await.unwrap_err();
    assert!(matches!(err, UploadError::Unmounted));

    spawn_image_upload(weak, path, |s: &mut String, url| *s = url).await.unwrap();
}

#[tokio::test]
async fn failed_upload_leaves_target_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let target = Arc::new(Mutex::new(String::from("/placeholder.svg")));
    spawn_image_upload(Arc::downgrade(&target), dir.path().join("gone.png"), |s: &mut String, url| *s = url)
        .await
        .unwrap();
    assert_eq!(*target.lock().unwrap(), "/placeholder.svg");
}
