use std::path::PathBuf;
use std::sync::Weak;

use tracing::{debug, info, warn};

use super::event::{Event, ReparseMode, RequestToken};
use super::generator::{Generator, ProjectBuildSystem, ProjectNode};
use super::state::ParseState;
use crate::build_config::BuildConfiguration;

/// Decides when a build configuration is reparsed and applies the results.
///
/// Events are recorded with [`handle`](Self::handle), which never talks to
/// the generator for requests; [`dispatch`](Self::dispatch) hands the
/// strongest pending request to the generator. Calling `dispatch` once after
/// a burst of events yields a single parse.
pub struct ReparseCoordinator<G: Generator> {
  config: BuildConfiguration,
  generator: G,
  project: Weak<dyn ProjectBuildSystem>,
  state: ParseState,
  active: bool,
  last_token: u64,
}

impl<G: Generator> ReparseCoordinator<G> {
  /// Starts inactive and idle.
  pub fn new(config: BuildConfiguration, generator: G, project: Weak<dyn ProjectBuildSystem>) -> Self {
    Self {
      config,
      generator,
      project,
      state: ParseState::Idle,
      active: false,
      last_token: 0,
    }
  }

  pub fn configuration(&self) -> &BuildConfiguration {
    &self.config
  }

  pub fn generator(&self) -> &G {
    &self.generator
  }

  pub fn generator_mut(&mut self) -> &mut G {
    &mut self.generator
  }

  pub fn state(&self) -> ParseState {
    self.state
  }

  pub fn is_active(&self) -> bool {
    self.active
  }

  /// Handle one event, then dispatch.
  pub fn process(&mut self, event: Event) -> Option<RequestToken> {
    self.handle(event);
    self.dispatch()
  }

  /// Record the effect of `event`.
  pub fn handle(&mut self, event: Event) {
    debug!(event = event.name(), config = %self.config.display_name(), active = self.active, "handling event");

    match event {
      Event::KitUpdated(kit) => {
        if kit.id != self.config.kit().id {
          return;
        }
        self.config.set_kit(kit);
        self.request(ReparseMode::CheckConfiguration);
      }
      Event::Activated => {
        self.active = true;
        self.request(ReparseMode::CheckConfiguration);
      }
      Event::Deactivated => {
        self.active = false;
        if !self.state.is_idle() {
          self.generator.stop_parsing_and_clear_state();
        }
        self.state = ParseState::Idle;
      }
      Event::EnvironmentChanged(environment) => {
        self.config.set_environment(environment);
        if self.active {
          self.request(ReparseMode::CheckConfiguration);
        }
      }
      Event::BuildDirectoryChanged(dir) => {
        self.config.set_build_directory(dir);
        if self.active {
          self.request(ReparseMode::CheckConfiguration);
        }
      }
      Event::ConfigurationEdited(items) => {
        let outcome = self.config.apply_edits(&items);
        if outcome.requires_clean {
          self.notify(|project, config| project.clean_requested(config));
        }
        if self.active {
          self.request(ReparseMode::ForceConfiguration);
        }
      }
      Event::ProjectFileDirty => {
        if self.active {
          self.request(ReparseMode::Default);
        }
      }
      Event::ParsingSucceeded(token) => self.parsing_succeeded(token),
      Event::ParsingFailed { token, message } => self.parsing_failed(token, &message),
    }
  }

  /// Hand a pending request to the generator. Returns the token of the
  /// parse that was started.
  pub fn dispatch(&mut self) -> Option<RequestToken> {
    let mode = self.state.pending()?;

    self.last_token += 1;
    let token = RequestToken(self.last_token);
    let params = self.config.parse_parameters();

    match self.generator.request_parse(params, mode, token) {
      Ok(()) => {
        self.state = ParseState::Parsing {
          token,
          mode,
          queued: None,
        };
        debug!(%token, %mode, config = %self.config.display_name(), "parse started");
        self.config.clear_error(true);
        self.notify(|project, config| project.enabled_changed(config));
        Some(token)
      }
      Err(e) => {
        warn!(%token, %mode, error = %e, "generator rejected parse request");
        self.state = ParseState::Idle;
        self.record_failure(&e.to_string());
        None
      }
    }
  }

  /// Ask the generator for the project tree.
  pub fn generate_project_tree(&mut self, known_files: &[PathBuf]) -> Option<ProjectNode> {
    match self.generator.generate_project_tree(known_files) {
      Ok(tree) => Some(tree),
      Err(e) => {
        self.report_error(&e.to_string());
        None
      }
    }
  }

  fn request(&mut self, mode: ReparseMode) {
    self.state.request(mode);
    debug!(%mode, state = ?self.state, "parse requested");
  }

  fn accept_completion(&mut self, token: RequestToken) -> bool {
    if self.state.complete(token) {
      return true;
    }
    warn!(%token, in_flight = ?self.state.in_flight(), "discarding stale parse completion");
    false
  }

  fn parsing_succeeded(&mut self, token: RequestToken) {
    if !self.accept_completion(token) {
      return;
    }

    if !self.active {
      debug!(%token, "parse finished while inactive, discarding results");
      self.generator.stop_parsing_and_clear_state();
      return;
    }

    let mut enabled_changed = self.config.clear_error(false);

    match self.generator.take_build_targets() {
      Ok(targets) => self.config.set_build_targets(targets),
      Err(e) => enabled_changed |= self.config.set_error(&e.to_string()),
    }

    match self.generator.take_configuration() {
      Ok(configuration) => self.config.set_configuration_from_generator(configuration),
      Err(e) => enabled_changed |= self.config.set_error(&e.to_string()),
    }

    info!(
      %token,
      config = %self.config.display_name(),
      targets = self.config.build_targets().len(),
      "parsing succeeded"
    );

    self.notify(|project, config| project.parsing_succeeded(config));
    if enabled_changed {
      self.notify(|project, config| project.enabled_changed(config));
    }
  }

  fn parsing_failed(&mut self, token: RequestToken, message: &str) {
    if !self.accept_completion(token) {
      return;
    }
    warn!(%token, config = %self.config.display_name(), error = message, "parsing failed");
    self.record_failure(message);
  }

  fn record_failure(&mut self, message: &str) {
    let enabled_changed = self.config.set_error(message);

    if let Ok(configuration) = self.generator.take_configuration() {
      self.config.set_configuration_from_generator(configuration);
    }

    self.notify(|project, config| project.parsing_failed(config));
    if enabled_changed {
      self.notify(|project, config| project.enabled_changed(config));
    }
  }

  fn report_error(&mut self, message: &str) {
    if self.config.set_error(message) {
      self.notify(|project, config| project.enabled_changed(config));
    }
  }

  fn notify(&self, f: impl FnOnce(&dyn ProjectBuildSystem, &BuildConfiguration)) {
    match self.project.upgrade() {
      Some(project) => f(project.as_ref(), &self.config),
      None => debug!("project is gone, dropping notification"),
    }
  }
}
