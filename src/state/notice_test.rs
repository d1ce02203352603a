use super::*;

#[test]
fn notices_expire_after_ttl() {
    let mut notices = Notices::new(Duration::from_secs(5));
    let t0 = Instant::now();
    notices.raise(NoticeLevel::Error, "boom".into(), t0);

    assert_eq!(notices.visible(t0 + Duration::from_secs(4)).count(), 1);
    assert_eq!(notices.visible(t0 + Duration::from_secs(5)).count(), 0);
}

#[test]
fn prune_drops_only_expired() {
    let mut notices = Notices::new(Duration::from_secs(5));
    let t0 = Instant::now();
    notices.raise(NoticeLevel::Error, "old".into(), t0);
    notices.raise(NoticeLevel::Info, "new".into(), t0 + Duration::from_secs(3));

    notices.prune(t0 + Duration::from_secs(6));
    assert_eq!(notices.len(), 1);
    assert_eq!(notices.latest().map(|n| n.text.as_str()), Some("new"));
}

#[test]
fn error_and_info_set_levels() {
    let mut notices = Notices::default();
    notices.error("bad");
    assert_eq!(notices.latest().map(|n| n.level), Some(NoticeLevel::Error));
    notices.info("ok");
    assert_eq!(notices.latest().map(|n| n.level), Some(NoticeLevel::Info));
}
