#![cfg(feature = "tui")]

mod common;

use common::{FakeModel, TWO_FEATURE_REPLY};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};
use roadmap_optimizer::{
    OptimizerSession, PromptBuilder,
    ui::tui_app::{
        App, AppMode, Field, ResultTab, RunStatus, TuiAction, ViewSettings, handle_key,
        trigger_run, ui,
    },
};

fn app(credential: &str) -> App {
    App::new(
        OptimizerSession::new(
            "Increase User Retention",
            credential,
            "Dark Mode\nVoice Search",
        ),
        ViewSettings {
            bubble_scale: 25.0,
            model: "gemini-2.5-flash".into(),
            template_label: "built-in".into(),
        },
    )
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

fn draw(app: &mut App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(160, 44)).unwrap();
    terminal.draw(|f| ui(f, app)).unwrap();
    buffer_text(terminal.backend().buffer())
}

fn buffer_text(buf: &Buffer) -> String {
    let width = buf.area.width as usize;
    buf.content()
        .chunks(width)
        .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_successful_run_shows_chart_then_table() {
    let mut app = app("key");
    let model = FakeModel::replying(TWO_FEATURE_REPLY);
    let prompt = PromptBuilder::builtin().unwrap();

    trigger_run(&mut app, &model, &prompt, |_| Ok(())).unwrap();

    assert!(matches!(app.status, RunStatus::Done(_)));
    assert_eq!(app.focus.current, Field::Results);
    assert_eq!(app.results.tab, ResultTab::Chart);

    let chart_screen = draw(&mut app);
    assert!(chart_screen.contains("Analysis Complete!"));
    assert!(chart_screen.contains("Prioritization Matrix: Increase User Retention"));

    assert_eq!(handle_key(&mut app, key(KeyCode::Right)), None);
    assert_eq!(app.results.tab, ResultTab::Table);

    let table_screen = draw(&mut app);
    let voice = table_screen.find("Voice Search").unwrap();
    let dark = table_screen.find("Dark Mode").unwrap();
    assert!(voice < dark, "higher score should be listed first");
}

#[test]
fn test_status_frame_is_drawn_before_the_model_call() {
    let mut app = app("key");
    let model = FakeModel::replying(TWO_FEATURE_REPLY);
    let prompt = PromptBuilder::builtin().unwrap();
    let mut status_screen = String::new();

    trigger_run(&mut app, &model, &prompt, |app| {
        assert!(matches!(app.status, RunStatus::Running { features: 2 }));
        assert_eq!(model.calls.get(), 0);
        status_screen = draw(app);
        Ok(())
    })
    .unwrap();

    assert!(status_screen.contains("AI is calculating RICE scores for 2 features"));
    assert!(status_screen.contains("Working"));
    assert_eq!(model.calls.get(), 1);
    assert!(matches!(app.status, RunStatus::Done(_)));
}

#[test]
fn test_failing_status_hook_aborts_before_the_model_call() {
    let mut app = app("key");
    let model = FakeModel::replying(TWO_FEATURE_REPLY);
    let prompt = PromptBuilder::builtin().unwrap();

    let result = trigger_run(&mut app, &model, &prompt, |_| {
        Err(anyhow::anyhow!("terminal went away"))
    });

    assert!(result.is_err());
    assert_eq!(model.calls.get(), 0);
}

#[test]
fn test_missing_credential_moves_focus_to_key_field() {
    let mut app = app("");
    let model = FakeModel::replying(TWO_FEATURE_REPLY);
    let prompt = PromptBuilder::builtin().unwrap();

    trigger_run(&mut app, &model, &prompt, |_| Ok(())).unwrap();

    assert_eq!(model.calls.get(), 0);
    assert_eq!(app.focus.current, Field::ApiKey);
    assert!(draw(&mut app).contains("Please enter your API key."));
}

#[test]
fn test_malformed_reply_opens_raw_popup() {
    let mut app = app("key");
    let model = FakeModel::replying("Sorry, I can't do that.");
    let prompt = PromptBuilder::builtin().unwrap();

    trigger_run(&mut app, &model, &prompt, |_| Ok(())).unwrap();

    assert!(matches!(app.mode, AppMode::RawResponse { .. }));
    let screen = draw(&mut app);
    assert!(screen.contains("Raw model response"));
    assert!(screen.contains("Sorry, I can't do that."));

    assert_eq!(handle_key(&mut app, key(KeyCode::Esc)), None);
    assert!(matches!(app.mode, AppMode::Normal));
}

#[test]
fn test_new_run_clears_previous_results() {
    let mut app = app("key");
    let prompt = PromptBuilder::builtin().unwrap();
    trigger_run(&mut app, &FakeModel::replying(TWO_FEATURE_REPLY), &prompt, |_| Ok(())).unwrap();
    assert!(matches!(app.status, RunStatus::Done(_)));

    trigger_run(
        &mut app,
        &FakeModel::failing("503: overloaded"),
        &prompt,
        |_| Ok(()),
    )
    .unwrap();

    match &app.status {
        RunStatus::Failed { message, raw } => {
            assert!(message.contains("overloaded"));
            assert!(raw.is_none());
        }
        _ => panic!("expected a failed run"),
    }
    let screen = draw(&mut app);
    assert!(screen.contains("Run failed"));
    assert!(!screen.contains("Analysis Complete!"));
}

#[test]
fn test_form_editing_and_focus() {
    let mut app = app("");
    assert_eq!(app.focus.current, Field::Goal);

    handle_key(&mut app, ctrl('u'));
    for c in "Grow".chars() {
        handle_key(&mut app, key(KeyCode::Char(c)));
    }
    assert_eq!(app.session.goal, "Grow");

    handle_key(&mut app, key(KeyCode::Tab));
    assert_eq!(app.focus.current, Field::ApiKey);
    for c in "abc".chars() {
        handle_key(&mut app, key(KeyCode::Char(c)));
    }
    handle_key(&mut app, key(KeyCode::Backspace));
    assert_eq!(app.session.credential, "ab");
    let screen = draw(&mut app);
    assert!(screen.contains("••"));
    assert!(!screen.contains("Grow▌"));

    handle_key(&mut app, key(KeyCode::Tab));
    assert_eq!(app.focus.current, Field::Features);
    handle_key(&mut app, key(KeyCode::Enter));
    handle_key(&mut app, key(KeyCode::Char('X')));
    assert_eq!(app.session.features_text, "Dark Mode\nVoice Search\nX");

    handle_key(&mut app, key(KeyCode::BackTab));
    assert_eq!(app.focus.current, Field::ApiKey);
}

#[test]
fn test_trigger_and_quit_keys() {
    let mut app = app("key");
    assert_eq!(handle_key(&mut app, ctrl('r')), Some(TuiAction::Optimize));
    assert_eq!(handle_key(&mut app, key(KeyCode::F(5))), Some(TuiAction::Optimize));

    app.focus.current = Field::Optimize;
    assert_eq!(handle_key(&mut app, key(KeyCode::Enter)), Some(TuiAction::Optimize));

    assert_eq!(handle_key(&mut app, key(KeyCode::Esc)), Some(TuiAction::Quit));
    assert_eq!(handle_key(&mut app, ctrl('c')), Some(TuiAction::Quit));
}

#[test]
fn test_idle_screen_masks_the_key() {
    let mut app = app("secret-key");
    let screen = draw(&mut app);
    assert!(!screen.contains("secret-key"));
    assert!(screen.contains("Business Goal"));
    assert!(screen.contains("Ctrl-R"));
}
