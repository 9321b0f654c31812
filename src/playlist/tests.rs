use super::*;
use std::path::PathBuf;

fn t(title: &str) -> Track {
    Track {
        title: title.into(),
        artist: "Artist".into(),
        source: PathBuf::from(format!("{title}.mp3")),
        cover: None,
    }
}

#[test]
fn empty_playlist_is_rejected() {
    assert!(PlaylistCursor::new(Vec::new()).is_err());
}

#[test]
fn starts_at_first_track() {
    let cursor = PlaylistCursor::new(vec![t("A"), t("B")]).unwrap();
    assert_eq!(cursor.index(), 0);
    assert_eq!(cursor.current().title, "A");
}

#[test]
fn next_wraps_after_last_track() {
    let mut cursor = PlaylistCursor::new(vec![t("A"), t("B"), t("C")]).unwrap();
    cursor.next();
    cursor.next();
    assert_eq!(cursor.index(), 2);
    cursor.next();
    assert_eq!(cursor.index(), 0);
}

#[test]
fn previous_from_first_wraps_to_last() {
    let mut cursor = PlaylistCursor::new(vec![t("A"), t("B"), t("C")]).unwrap();
    cursor.previous();
    assert_eq!(cursor.index(), 2);
    assert_eq!(cursor.current().title, "C");
}

#[test]
fn next_called_len_times_returns_to_original_index() {
    let mut cursor = PlaylistCursor::new(vec![t("A"), t("B"), t("C"), t("D")]).unwrap();
    cursor.next();
    let start = cursor.index();
    for _ in 0..cursor.len() {
        cursor.next();
    }
    assert_eq!(cursor.index(), start);
}

#[test]
fn single_track_playlist_stays_put() {
    let mut cursor = PlaylistCursor::new(vec![t("Only")]).unwrap();
    cursor.next();
    assert_eq!(cursor.index(), 0);
    cursor.previous();
    assert_eq!(cursor.index(), 0);
}
