use std::sync::Arc;

use reconf_lib::build_config::{BuildTarget, TargetType};
use reconf_lib::config::ConfigItem;
use reconf_lib::environment::Environment;
use reconf_lib::reparse::{EventLoop, Event, ParseState, ReparseMode, RequestToken, channel};

use super::common::{RecordingProject, coordinator, kit_with};

#[tokio::test]
async fn activation_runs_one_check_with_kit_configuration() {
  let project = Arc::new(RecordingProject::default());
  let (tx, rx) = channel();
  let mut event_loop = EventLoop::new(coordinator(kit_with(&[("TOOLCHAIN", "gcc")]), &project), rx);

  tx.send(Event::Activated).unwrap();
  assert!(event_loop.next_batch().await);

  let requests = &event_loop.coordinator().generator().requests;
  assert_eq!(requests.len(), 1);
  let (params, mode, token) = &requests[0];
  assert_eq!(*mode, ReparseMode::CheckConfiguration);
  assert_eq!(*token, RequestToken(1));
  let items: Vec<_> = params
    .configuration
    .iter()
    .map(|i| (i.key.as_str(), i.value.as_str()))
    .collect();
  assert_eq!(items, vec![("TOOLCHAIN", "gcc")]);
}

#[tokio::test]
async fn burst_of_events_becomes_one_force_parse() {
  let project = Arc::new(RecordingProject::default());
  let (tx, rx) = channel();
  let mut event_loop = EventLoop::new(coordinator(kit_with(&[]), &project), rx);

  tx.send(Event::Activated).unwrap();
  tx.send(Event::EnvironmentChanged(Environment::new())).unwrap();
  tx.send(Event::ConfigurationEdited(vec![ConfigItem::new("WITH_TESTS", "ON")]))
    .unwrap();
  tx.send(Event::ProjectFileDirty).unwrap();
  assert!(event_loop.next_batch().await);

  let modes: Vec<_> = event_loop
    .coordinator()
    .generator()
    .requests
    .iter()
    .map(|(_, mode, _)| *mode)
    .collect();
  assert_eq!(modes, vec![ReparseMode::ForceConfiguration]);
  assert!(
    event_loop
      .coordinator()
      .configuration()
      .stored_configuration()
      .contains_key("WITH_TESTS")
  );
}

#[tokio::test]
async fn completion_and_follow_up_request() {
  let project = Arc::new(RecordingProject::default());
  let (tx, rx) = channel();
  let mut event_loop = EventLoop::new(coordinator(kit_with(&[]), &project), rx);
  event_loop.coordinator_mut().generator_mut().targets =
    vec![BuildTarget::new("hello", TargetType::Executable).with_executable("/work/build-debug/hello")];

  tx.send(Event::Activated).unwrap();
  assert!(event_loop.next_batch().await);

  tx.send(Event::ParsingSucceeded(RequestToken(1))).unwrap();
  tx.send(Event::ProjectFileDirty).unwrap();
  drop(tx);

  let coordinator = event_loop.run().await;

  assert_eq!(coordinator.configuration().build_target_titles(), vec!["hello"]);
  assert_eq!(*project.succeeded.lock().unwrap(), vec![vec!["hello".to_string()]]);
  assert_eq!(coordinator.generator().requests.len(), 2);
  assert_eq!(coordinator.generator().requests[1].1, ReparseMode::Default);
  assert_eq!(
    coordinator.state(),
    ParseState::Parsing {
      token: RequestToken(2),
      mode: ReparseMode::Default,
      queued: None,
    }
  );
}

#[tokio::test]
async fn cancelled_request_does_not_apply() {
  let project = Arc::new(RecordingProject::default());
  let (tx, rx) = channel();
  let mut event_loop = EventLoop::new(coordinator(kit_with(&[]), &project), rx);
  event_loop.coordinator_mut().generator_mut().targets = vec![BuildTarget::new("hello", TargetType::Executable)];

  tx.send(Event::Activated).unwrap();
  event_loop.next_batch().await;
  tx.send(Event::Deactivated).unwrap();
  tx.send(Event::Activated).unwrap();
  event_loop.next_batch().await;
  assert_eq!(event_loop.coordinator().generator().stops, 1);

  tx.send(Event::ParsingFailed {
    token: RequestToken(1),
    message: "cancelled".to_string(),
  })
  .unwrap();
  event_loop.next_batch().await;

  let config = event_loop.coordinator().configuration();
  assert!(config.is_enabled());
  assert!(config.build_targets().is_empty());
  assert!(project.failed.lock().unwrap().is_empty());

  tx.send(Event::ParsingSucceeded(RequestToken(2))).unwrap();
  event_loop.next_batch().await;

  assert_eq!(event_loop.coordinator().configuration().build_target_titles(), vec!["hello"]);
}

#[tokio::test]
async fn loop_ends_when_senders_are_gone() {
  let project = Arc::new(RecordingProject::default());
  let (tx, rx) = channel();
  let mut event_loop = EventLoop::new(coordinator(kit_with(&[]), &project), rx);

  drop(tx);

  assert!(!event_loop.next_batch().await);
  assert!(event_loop.coordinator().generator().requests.is_empty());
}

#[test]
fn project_tree_comes_from_generator() {
  let project = Arc::new(RecordingProject::default());
  let mut c = coordinator(kit_with(&[]), &project);

  let tree = c
    .generate_project_tree(&["/work/hello/main.cpp".into()])
    .unwrap();

  assert_eq!(tree.file_count(), 1);
  assert!(c.configuration().is_enabled());
}
