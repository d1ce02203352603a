use super::*;

fn event(line: &str) -> Event {
    match parse_line(line) {
        Ok(Some(Command::Event(event))) => event,
        other => panic!("expected an event for {line:?}, got {other:?}"),
    }
}

// =============================================================================
// MESSAGES
// =============================================================================

#[test]
fn plain_text_is_a_message() {
    assert_eq!(event("  hello there "), Event::Send("hello there".into()));
}

#[test]
fn double_slash_escapes_a_message() {
    assert_eq!(event("//etc/hosts is missing"), Event::Send("/etc/hosts is missing".into()));
}

#[test]
fn blank_line_is_ignored() {
    assert_eq!(parse_line("   "), Ok(None));
}

// =============================================================================
// THREAD COMMANDS
// =============================================================================

#[test]
fn new_and_switch() {
    assert_eq!(event("/new"), Event::NewChat);
    assert_eq!(event("/switch t1"), Event::Select("t1".into()));
    assert_eq!(parse_line("/switch"), Err(ParseError::Usage("/switch <id>")));
}

#[test]
fn rename_keeps_multi_word_title() {
    assert_eq!(
        event("/rename t1   Weekend  plans "),
        Event::Rename { target: Target::Thread("t1".into()), title: "Weekend  plans".into() }
    );
    assert_eq!(
        event("/rename . Notes"),
        Event::Rename { target: Target::Active, title: "Notes".into() }
    );
}

#[test]
fn rename_without_title_is_left_to_the_controller() {
    assert_eq!(
        event("/rename t1"),
        Event::Rename { target: Target::Thread("t1".into()), title: String::new() }
    );
}

#[test]
fn pin_and_delete_default_to_active_thread() {
    assert_eq!(event("/pin"), Event::TogglePin(Target::Active));
    assert_eq!(event("/pin t2"), Event::TogglePin(Target::Thread("t2".into())));
    assert_eq!(event("/delete"), Event::Delete(Target::Active));
    assert_eq!(event("/delete-all"), Event::DeleteAll);
}

// =============================================================================
// MODEL SETTINGS
// =============================================================================

#[test]
fn model_commands_build_forms() {
    assert_eq!(event("/models"), Event::RefreshModels);
    assert_eq!(
        event("/model ollama llama3"),
        Event::UpdateModelSettings(ModelSettingsForm {
            provider: Provider::Ollama,
            model_name: Some("llama3".into()),
            api_key: None,
        })
    );
    assert_eq!(
        event("/model gemini sk-123"),
        Event::UpdateModelSettings(ModelSettingsForm {
            provider: Provider::Gemini,
            model_name: None,
            api_key: Some("sk-123".into()),
        })
    );
}

#[test]
fn model_command_rejects_bad_provider() {
    assert_eq!(parse_line("/model openai"), Err(ParseError::UnknownProvider("openai".into())));
    assert!(matches!(parse_line("/model"), Err(ParseError::Usage(_))));
    assert!(matches!(parse_line("/model ollama a b"), Err(ParseError::Usage(_))));
}

// =============================================================================
// LOCAL COMMANDS
// =============================================================================

#[test]
fn local_commands() {
    assert_eq!(parse_line("/prev"), Ok(Some(Command::Prev)));
    assert_eq!(parse_line("/next"), Ok(Some(Command::Next)));
    assert_eq!(parse_line("/list"), Ok(Some(Command::List)));
    assert_eq!(parse_line("/think"), Ok(Some(Command::ToggleThinking)));
    assert_eq!(parse_line("/help"), Ok(Some(Command::Help)));
    assert_eq!(parse_line("/quit"), Ok(Some(Command::Quit)));
}

#[test]
fn unknown_command_is_an_error() {
    let err = parse_line("/frobnicate now").unwrap_err();
    assert_eq!(err, ParseError::UnknownCommand("frobnicate".into()));
    assert_eq!(err.to_string(), "unknown command: /frobnicate (try /help)");
}
