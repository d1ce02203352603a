use std::time::{Duration, Instant};

use super::*;
use crate::state::notice::NoticeLevel;
use crate::state::pane::PaneMessage;

fn summary(id: &str, title: &str, pinned: bool) -> ThreadSummary {
    ThreadSummary {
        thread_id: id.to_owned(),
        title: title.to_owned(),
        icon: "💬".to_owned(),
        is_pinned: pinned,
        last_activity: None,
    }
}

fn state_with(active: ActiveThread, threads: Vec<ThreadSummary>) -> SessionState {
    SessionState { threads, active, ..SessionState::default() }
}

fn active_count(view: &SidebarView) -> usize {
    view.items().filter(|item| item.active).count()
}

// =============================================================================
// SIDEBAR
// =============================================================================

#[test]
fn placeholder_leads_recent_group() {
    let state = state_with(ActiveThread::Placeholder, vec![summary("t1", "Hello", false)]);

    let view = sidebar(&state);

    assert_eq!(view.recent.len(), 2);
    let first = &view.recent[0];
    assert_eq!(first.thread_id, None);
    assert_eq!(first.title, PLACEHOLDER_TITLE);
    assert_eq!(first.icon, PLACEHOLDER_ICON);
    assert!(first.active);
    assert!(!view.recent[1].active);
}

#[test]
fn pinned_threads_are_grouped_in_backend_order() {
    let state = state_with(
        ActiveThread::Real("t2".into()),
        vec![
            summary("t1", "One", true),
            summary("t2", "Two", false),
            summary("t3", "Three", true),
            summary("t4", "Four", false),
        ],
    );

    let view = sidebar(&state);

    let pinned: Vec<_> = view.pinned.iter().filter_map(|i| i.thread_id.as_deref()).collect();
    let recent: Vec<_> = view.recent.iter().filter_map(|i| i.thread_id.as_deref()).collect();
    assert_eq!(pinned, ["t1", "t3"]);
    assert_eq!(recent, ["t2", "t4"]);
}

#[test]
fn exactly_one_item_is_active() {
    let threads = vec![summary("t1", "One", true), summary("t2", "Two", false)];
    let cases = [
        ActiveThread::Placeholder,
        ActiveThread::Real("t1".into()),
        ActiveThread::Real("t2".into()),
        ActiveThread::Real("loading".into()),
    ];
    for active in cases {
        let view = sidebar(&state_with(active.clone(), threads.clone()));
        assert_eq!(active_count(&view), 1, "active = {active:?}");
    }
}

#[test]
fn unlisted_active_thread_is_shown_under_its_id() {
    let view = sidebar(&state_with(ActiveThread::Real("t7".into()), vec![]));

    assert_eq!(view.recent.len(), 1);
    assert_eq!(view.recent[0].title, "t7");
    assert_eq!(view.recent[0].icon, DEFAULT_THREAD_ICON);
}

#[test]
fn label_prefers_backend_activity_text() {
    let mut t1 = summary("t1", "One", false);
    t1.last_activity = Some("2h ago".into());
    let state = state_with(ActiveThread::Real("t2".into()), vec![t1, summary("t2", "Two", false)]);

    let view = sidebar(&state);

    assert_eq!(view.recent[0].label.as_deref(), Some("2h ago"));
    assert_eq!(view.recent[1].label.as_deref(), Some(ACTIVE_LABEL));
}

#[test]
fn format_sidebar_marks_active_row() {
    let state = state_with(ActiveThread::Placeholder, vec![summary("t1", "Hello", true)]);

    let text = format_sidebar(&sidebar(&state));

    assert!(text.starts_with("Pinned\n"));
    assert!(text.contains("  💬 Hello [t1]\n"));
    assert!(text.contains("> 📝 New Conversation [-]  Active\n"));
}

// =============================================================================
// MESSAGE PANE
// =============================================================================

fn pane_with_trace() -> MessagePane {
    let mut pane = MessagePane::default();
    pane.push(PaneMessage::human("why?"));
    pane.push(PaneMessage::assistant("because", Some("first\nsecond".into())));
    pane
}

#[test]
fn thinking_trace_is_collapsed_by_default() {
    let lines = pane(&pane_with_trace(), false);

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[2], PaneLine::Thinking { text: None });
    assert!(format_pane(&lines).contains(THINKING_COLLAPSED));
}

#[test]
fn thinking_trace_expands_on_request() {
    let lines = pane(&pane_with_trace(), true);

    let text = format_pane(&lines);
    assert!(text.contains("    | first\n    | second\n"));
    assert!(!text.contains(THINKING_COLLAPSED));
}

#[test]
fn awaiting_reply_appends_typing_line() {
    let mut pane_state = pane_with_trace();
    pane_state.awaiting_reply = true;

    let lines = pane(&pane_state, false);

    assert_eq!(lines.last(), Some(&PaneLine::Typing));
    assert!(format_pane(&lines).ends_with(&format!("{TYPING_LINE}\n")));
}

#[test]
fn message_rows_name_the_sender() {
    let text = format_pane(&pane(&pane_with_trace(), false));
    assert!(text.contains("] you: why?\n"));
    assert!(text.contains("] assistant: because\n"));
}

// =============================================================================
// NOTICES
// =============================================================================

#[test]
fn expired_notices_are_not_printed() {
    let mut notices = Notices::new(Duration::from_secs(5));
    let t0 = Instant::now();
    notices.raise(NoticeLevel::Error, "old".into(), t0);
    notices.raise(NoticeLevel::Info, "fresh".into(), t0 + Duration::from_secs(4));

    let text = format_notices(&notices, t0 + Duration::from_secs(6));

    assert_eq!(text, "(info) fresh\n");
}
