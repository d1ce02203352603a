use super::*;

#[test]
fn transport_errors_use_generic_message() {
    let err = ServiceError::Transport("connection refused".into());
    assert_eq!(err.user_message(), TRANSPORT_FAILURE_MESSAGE);
}

#[test]
fn backend_errors_are_surfaced_verbatim() {
    let err = ServiceError::Backend { status: 400, message: "Thread ID missing".into() };
    assert_eq!(err.user_message(), "Thread ID missing");
}

#[test]
fn status_failed_message_formats_status() {
    assert_eq!(status_failed_message(502), "request failed with status 502");
}
