use std::sync::Arc;
use std::time::Duration;

use kanal::{AsyncReceiver, AsyncSender};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;
use tokio::time::timeout;
use tuicher_config::Config;
use tuicher_core::layout::RowLayout;
use tuicher_core::{
    ActionExecutor, BackendError, ControllerContext, ControllerError, InteractionController,
};
use tuicher_types::{Action, PushEvent, SearchResult};

use super::*;
use crate::search::ConfigSearchBackend;
use crate::window::StdioWindow;

const WAIT: Duration = Duration::from_secs(2);

struct RecordingExecutor {
    calls: AsyncSender<Action>,
}

#[async_trait::async_trait]
impl ActionExecutor for RecordingExecutor {
    async fn execute_action(&self, action: Action) -> Result<(), BackendError> {
        let unsupported = action == Action::OpenSettings;
        let _ = self.calls.send(action).await;
        if unsupported {
            return Err(BackendError::Unsupported("settings".to_string()));
        }
        Ok(())
    }
}

struct Setup {
    bridge: Arc<StdioBridge>,
    push_tx: AsyncSender<PushEvent>,
    executed: AsyncReceiver<Action>,
    _tasks: JoinSet<Result<(), ControllerError>>,
}

fn setup() -> Setup {
    let (calls, executed) = kanal::unbounded_async();
    let (push_tx, push_rx) = kanal::unbounded_async();
    let output = kanal::unbounded_async();

    let ctx = ControllerContext::new(
        Arc::new(ConfigSearchBackend::new(Arc::new(Config::default()))),
        Arc::new(RecordingExecutor { calls }),
        Arc::new(StdioWindow::new(output.0.clone())),
        Arc::new(RowLayout::new(40.0, 80.0)),
    );
    let (handle, tasks) = InteractionController::spawn(ctx, push_rx, 16);

    Setup {
        bridge: Arc::new(StdioBridge::new(handle, output)),
        push_tx,
        executed,
        _tasks: tasks,
    }
}

#[test]
fn blank_and_malformed_lines_are_skipped() {
    assert_eq!(parse_action(""), None);
    assert_eq!(parse_action("   "), None);
    assert_eq!(parse_action("{\"action\":\"jump\"}"), None);
    assert_eq!(parse_action("not json"), None);
    assert_eq!(
        parse_action(" {\"action\":\"enter-press\"} "),
        Some(MainScreenAction::EnterPress)
    );
}

#[tokio::test]
async fn input_lines_drive_the_controller() {
    let s = setup();
    let mut state = s.bridge.handle.subscribe();

    let input: &[u8] = b"garbage\n{\"action\":\"search-input\",\"text\":\"sett\"}\n\n";
    s.bridge.forward_to_controller(input).await.unwrap();

    timeout(WAIT, state.wait_for(|state| state.results.len() == 2))
        .await
        .unwrap()
        .unwrap();

    let input: &[u8] = b"{\"action\":\"arrow-down\"}\n{\"action\":\"enter-press\"}\n";
    s.bridge.forward_to_controller(input).await.unwrap();

    let action = timeout(WAIT, s.executed.recv()).await.unwrap().unwrap();
    assert_eq!(
        action,
        Action::OpenUrl {
            url: "https://www.google.com/search?q=sett".to_string()
        }
    );
    assert!(s.bridge.handle.snapshot().results.is_empty());
}

#[tokio::test]
async fn output_is_one_json_object_per_line() {
    let s = setup();
    let (writer, reader) = tokio::io::duplex(4096);

    let bridge = s.bridge.clone();
    tokio::spawn(async move { bridge.write_output(writer).await });
    let states = s.bridge.clone();
    tokio::spawn(async move { states.forward_state().await });

    s.bridge
        .handle
        .dispatch(MainScreenAction::EscapePress)
        .await
        .unwrap();

    let mut lines = BufReader::new(reader).lines();
    let first = timeout(WAIT, lines.next_line()).await.unwrap().unwrap().unwrap();
    assert_eq!(first, r#"{"event":"window-close"}"#);

    s.push_tx
        .send(PushEvent::ShowPluginResults {
            results: vec![SearchResult::new("from plugin", "plugin")],
        })
        .await
        .unwrap();

    // The reset snapshot may or may not be written before the push lands
    let pushed = timeout(WAIT, async {
        loop {
            let line = lines.next_line().await.unwrap().unwrap();
            let value: serde_json::Value = serde_json::from_str(&line).unwrap();
            assert_eq!(value["event"], "state");
            if !value["state"]["results"].as_array().unwrap().is_empty() {
                return value;
            }
        }
    })
    .await
    .unwrap();

    assert_eq!(pushed["state"]["results"][0]["text"], "from plugin");
    assert_eq!(pushed["state"]["selected_index"], 0);
    assert_eq!(pushed["state"]["query_text"], "");
}

#[tokio::test]
async fn action_failures_are_reported_to_the_view() {
    let s = setup();
    let errors = s.bridge.clone();
    tokio::spawn(async move { errors.forward_errors().await });
    let (writer, reader) = tokio::io::duplex(4096);
    let bridge = s.bridge.clone();
    tokio::spawn(async move { bridge.write_output(writer).await });

    // Give the forwarder time to subscribe
    tokio::time::sleep(Duration::from_millis(20)).await;

    let mut state = s.bridge.handle.subscribe();
    s.bridge
        .handle
        .dispatch(MainScreenAction::SearchInput {
            text: "settings".into(),
        })
        .await
        .unwrap();
    timeout(WAIT, state.wait_for(|state| !state.results.is_empty()))
        .await
        .unwrap()
        .unwrap();
    s.bridge
        .handle
        .dispatch(MainScreenAction::EnterPress)
        .await
        .unwrap();

    let mut lines = BufReader::new(reader).lines();
    let line = timeout(WAIT, lines.next_line()).await.unwrap().unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&line).unwrap();
    assert_eq!(value["event"], "error");
    assert!(value["message"].as_str().unwrap().starts_with("OpenSettings action failed"));
}
