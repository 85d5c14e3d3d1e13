use std::io::Cursor;

use super::*;

fn png(w: u32, h: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba([10, 20, 30, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn settle_applies_current_request() {
    let mut slot = AssetSlot::new("background");
    let bytes = png(4, 2);
    let job = slot.request(SourceId::of_bytes(&bytes), bytes);
    assert!(slot.is_pending());

    assert_eq!(slot.settle(job.run()), SettleOutcome::Applied);
    assert!(!slot.is_pending());
    assert_eq!(slot.image().unwrap().width, 4);
}

#[test]
fn superseded_result_is_discarded() {
    let mut slot = AssetSlot::new("background");
    let first = slot.request(SourceId::from_key("a.png"), png(4, 2));
    let second = slot.request(SourceId::from_key("b.png"), png(8, 8));

    // The newer request finishes first; the older one arrives late.
    assert_eq!(slot.settle(second.run()), SettleOutcome::Applied);
    assert_eq!(slot.settle(first.run()), SettleOutcome::Stale);
    assert_eq!(slot.image().unwrap().width, 8);
}

#[test]
fn rerequesting_same_source_still_invalidates_older_ticket() {
    let mut slot = AssetSlot::new("watermark");
    let id = SourceId::from_key("logo.png");
    let old = slot.request(id, png(2, 2));
    let new = slot.request(id, png(3, 3));
    assert_eq!(slot.settle(old.run()), SettleOutcome::Stale);
    assert_eq!(slot.settle(new.run()), SettleOutcome::Applied);
}

#[test]
fn failed_decode_empties_slot_and_clear_cancels() {
    let mut slot = AssetSlot::new("background");
    let ok = slot.request(SourceId::from_key("ok"), png(2, 2));
    slot.settle(ok.run());
    assert!(slot.image().is_some());

    let bad = slot.request(SourceId::from_key("bad"), b"garbage".to_vec());
    assert_eq!(slot.settle(bad.run()), SettleOutcome::Failed);
    assert!(slot.image().is_none());

    let pending = slot.request(SourceId::from_key("late"), png(2, 2));
    slot.clear();
    assert_eq!(slot.settle(pending.run()), SettleOutcome::Stale);
    assert!(slot.image().is_none());
    assert!(!slot.is_pending());
}

#[test]
fn source_ids_differ_by_kind_and_content() {
    assert_eq!(SourceId::of_bytes(b"x"), SourceId::of_bytes(b"x"));
    assert_ne!(SourceId::of_bytes(b"x"), SourceId::of_bytes(b"y"));
    assert_ne!(SourceId::of_bytes(b"x"), SourceId::from_key("x"));
}
