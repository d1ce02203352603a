use super::test_helpers::*;
use super::*;
use crate::state::pane::Sender;

fn started_on_t1() -> ConversationController {
    let mut ctl = ConversationController::new(SessionState::default());
    let ticket = ctl
        .start(Bootstrap { chats: vec![thread("t1", "Hello"), thread("t2", "Plans")], active_thread_id: Some("t1".into()) })
        .expect("bootstrap with an active id should load it");
    let reply = switch_reply(
        "t1",
        vec![human("Hello"), ai("Hi")],
        vec![thread("t1", "Hello"), thread("t2", "Plans")],
    );
    ctl.complete_switch(ticket, Ok(reply)).unwrap();
    ctl
}

// =============================================================================
// START
// =============================================================================

#[test]
fn cold_start_without_threads_enters_placeholder() {
    let mut ctl = ConversationController::new(SessionState::default());
    let ticket = ctl.start(Bootstrap { chats: vec![], active_thread_id: None });

    assert!(ticket.is_none());
    assert_eq!(ctl.state().active, ActiveThread::Placeholder);
    assert!(ctl.state().pane.is_empty());
}

#[test]
fn cold_start_with_active_id_targets_that_thread() {
    let mut ctl = ConversationController::new(SessionState::default());
    let ticket = ctl
        .start(Bootstrap { chats: vec![thread("t1", "A"), thread("t2", "B")], active_thread_id: Some("t2".into()) })
        .unwrap();
    assert_eq!(ticket.thread_id(), "t2");
    assert_eq!(ctl.state().active, ActiveThread::Real("t2".into()));
}

#[test]
fn cold_start_without_active_id_uses_first_thread() {
    let mut ctl = ConversationController::new(SessionState::default());
    let ticket = ctl
        .start(Bootstrap { chats: vec![thread("t1", "A"), thread("t2", "B")], active_thread_id: None })
        .unwrap();
    assert_eq!(ticket.thread_id(), "t1");
}

#[tokio::test]
async fn start_with_loads_initial_history() {
    let svc = MockService::new().on_switch(Ok(switch_reply(
        "t1",
        vec![human("Hello"), ai("Hi")],
        vec![thread("t1", "Hello")],
    )));
    let mut ctl = ConversationController::new(SessionState::default());

    let outcome = ctl
        .start_with(&svc, Bootstrap { chats: vec![thread("t1", "Hello")], active_thread_id: Some("t1".into()) })
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Applied);
    assert_eq!(svc.calls(), vec![Call::Switch("t1".into())]);
    assert_eq!(ctl.state().pane.messages().len(), 2);
    assert!(ctl.state().pane.is_loaded_for("t1"));
}

// =============================================================================
// NEW CHAT
// =============================================================================

#[test]
fn new_chat_clears_pane_and_resets_history_cursor() {
    let mut ctl = started_on_t1();
    ctl.recall_previous();

    ctl.new_chat();

    assert_eq!(ctl.state().active, ActiveThread::Placeholder);
    assert!(ctl.state().pane.is_empty());
    assert_eq!(ctl.state().history.cursor(), 0);
    assert_eq!(ctl.state().threads.len(), 2);
}

#[tokio::test]
async fn new_chat_event_makes_no_backend_call() {
    let svc = MockService::new();
    let mut ctl = started_on_t1();
    let outcome = ctl.handle(&svc, Event::NewChat).await.unwrap();
    assert_eq!(outcome, Outcome::Applied);
    assert!(svc.calls().is_empty());
}

#[test]
fn new_chat_from_placeholder_drops_unsent_history() {
    let mut ctl = ConversationController::new(SessionState::default());
    ctl.start(Bootstrap::default());
    let ticket = ctl.begin_send("draft").unwrap();
    ctl.complete_send(ticket, Err(backend_error("down"))).unwrap_err();

    ctl.new_chat();

    assert!(ctl.state().history.entries(&ThreadKey::Placeholder).is_empty());
    assert!(ctl.state().pane.is_empty());
}

// =============================================================================
// SWITCH
// =============================================================================

#[test]
fn switch_replaces_pane_and_rebuilds_history() {
    let mut ctl = started_on_t1();
    let ticket = ctl.begin_switch("t2").unwrap();
    let reply = switch_reply(
        "t2",
        vec![human("first"), ai("one"), human("second"), ai("two")],
        vec![thread("t2", "Plans"), thread("t1", "Hello")],
    );

    let outcome = ctl.complete_switch(ticket, Ok(reply)).unwrap();

    assert_eq!(outcome, Outcome::Applied);
    let state = ctl.state();
    assert_eq!(state.active, ActiveThread::Real("t2".into()));
    assert_eq!(state.pane.messages().len(), 4);
    assert_eq!(state.pane.messages()[0].content, "first");
    assert_eq!(state.pane.messages()[3].sender, Sender::Assistant);
    assert_eq!(state.history.entries(&ThreadKey::from("t2")), ["first", "second"]);
    assert_eq!(state.history.cursor(), 2);
    assert_eq!(state.threads[0].thread_id, "t2");
}

#[test]
fn switch_failure_keeps_state_and_raises_notice() {
    let mut ctl = started_on_t1();
    let before = ctl.state().pane.clone();
    let ticket = ctl.begin_switch("t2").unwrap();

    let err = ctl
        .complete_switch(ticket, Err(backend_error("unknown thread")))
        .unwrap_err();

    assert!(matches!(err, ControllerError::Service(_)));
    assert_eq!(ctl.state().active, ActiveThread::Real("t1".into()));
    assert_eq!(ctl.state().pane, before);
    let notice = ctl.state().notices.latest().unwrap();
    assert_eq!(notice.text, "Could not switch chat. unknown thread");
}

#[test]
fn stale_switch_result_does_not_touch_pane() {
    let mut ctl = started_on_t1();
    let to_a = ctl.begin_switch("t2").unwrap();
    let to_b = ctl.begin_switch("t3").unwrap();

    let applied = ctl
        .complete_switch(
            to_b,
            Ok(switch_reply(
                "t3",
                vec![human("third")],
                vec![thread("t1", "Hello"), thread("t2", "Plans"), thread("t3", "Notes")],
            )),
        )
        .unwrap();
    let stale = ctl
        .complete_switch(to_a, Ok(switch_reply("t2", vec![human("other")], vec![thread("t2", "Plans")])))
        .unwrap();

    assert_eq!(applied, Outcome::Applied);
    assert_eq!(stale, Outcome::Stale);
    assert_eq!(ctl.state().active, ActiveThread::Real("t3".into()));
    assert_eq!(ctl.state().pane.messages()[0].content, "third");
    assert_eq!(ctl.state().threads.len(), 3);
}

#[test]
fn reselecting_current_thread_cancels_pending_switch() {
    let mut ctl = started_on_t1();
    let to_a = ctl.begin_switch("t2").unwrap();

    assert!(ctl.begin_switch("t1").is_none());
    let outcome = ctl
        .complete_switch(to_a, Ok(switch_reply("t2", vec![human("other")], vec![thread("t2", "Plans")])))
        .unwrap();

    assert_eq!(outcome, Outcome::Stale);
    assert_eq!(ctl.state().active, ActiveThread::Real("t1".into()));
    assert_eq!(ctl.state().pane.messages()[0].content, "Hello");
}

#[test]
fn stale_switch_failure_raises_no_notice() {
    let mut ctl = started_on_t1();
    let to_a = ctl.begin_switch("t2").unwrap();
    ctl.new_chat();
    let outcome = ctl.complete_switch(to_a, Err(backend_error("late"))).unwrap();
    assert_eq!(outcome, Outcome::Stale);
    assert!(ctl.state().notices.is_empty());
    assert_eq!(ctl.state().active, ActiveThread::Placeholder);
}

#[tokio::test]
async fn reselecting_loaded_active_thread_is_a_no_op() {
    let svc = MockService::new();
    let mut ctl = started_on_t1();
    let before = ctl.state().pane.clone();

    let outcome = ctl.switch_chat(&svc, "t1").await.unwrap();

    assert_eq!(outcome, Outcome::Unchanged);
    assert!(svc.calls().is_empty());
    assert_eq!(ctl.state().pane, before);
}

#[tokio::test]
async fn reselecting_active_thread_refetches_when_not_loaded() {
    let svc = MockService::new()
        .on_switch(Err(ServiceError::Transport("refused".into())))
        .on_switch(Ok(switch_reply("t1", vec![human("Hello")], vec![thread("t1", "Hello")])));
    let mut ctl = ConversationController::new(SessionState::default());

    let first = ctl
        .start_with(&svc, Bootstrap { chats: vec![thread("t1", "Hello")], active_thread_id: None })
        .await;
    assert!(first.is_err());
    assert_eq!(ctl.state().active, ActiveThread::Real("t1".into()));

    let outcome = ctl.switch_chat(&svc, "t1").await.unwrap();
    assert_eq!(outcome, Outcome::Applied);
    assert_eq!(svc.calls(), vec![Call::Switch("t1".into()), Call::Switch("t1".into())]);
}

#[tokio::test]
async fn switching_away_from_placeholder_discards_it() {
    let svc = MockService::new().on_switch(Ok(switch_reply("t1", vec![], vec![thread("t1", "Hello")])));
    let mut ctl = ConversationController::new(SessionState::default());
    ctl.start(Bootstrap { chats: vec![thread("t1", "Hello")], active_thread_id: None });
    ctl.new_chat();

    ctl.handle(&svc, Event::Select("t1".into())).await.unwrap();

    assert_eq!(svc.calls(), vec![Call::Switch("t1".into())]);
    assert_eq!(ctl.state().active, ActiveThread::Real("t1".into()));
    assert!(ctl.state().threads.iter().all(|t| t.thread_id == "t1"));
}

// =============================================================================
// HISTORY RECALL
// =============================================================================

#[test]
fn recall_walks_active_thread_inputs() {
    let mut ctl = started_on_t1();
    assert_eq!(ctl.recall_previous(), Some("Hello"));
    assert_eq!(ctl.recall_previous(), Some("Hello"));
    assert_eq!(ctl.recall_next(), None);
    assert_eq!(ctl.state().history.cursor(), 1);
}

#[test]
fn cursor_stays_within_active_history_bounds() {
    let mut ctl = started_on_t1();
    for _ in 0..5 {
        ctl.recall_previous();
        let len = ctl.state().history.focused_len();
        assert!(ctl.state().history.cursor() <= len);
    }
    for _ in 0..5 {
        ctl.recall_next();
        let len = ctl.state().history.focused_len();
        assert!(ctl.state().history.cursor() <= len);
    }
}

// =============================================================================
// TARGET RESOLUTION
// =============================================================================

#[tokio::test]
async fn metadata_ops_on_placeholder_are_rejected_locally() {
    let svc = MockService::new();
    let mut ctl = ConversationController::new(SessionState::default());
    ctl.start(Bootstrap::default());

    let err = ctl
        .handle(&svc, Event::TogglePin(Target::Active))
        .await
        .unwrap_err();

    assert_eq!(err, ControllerError::Validation(ValidationError::NotPersisted));
    assert!(svc.calls().is_empty());
}
