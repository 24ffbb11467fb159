use super::event::{ReparseMode, RequestToken};

/// Where the coordinator stands with respect to the generator.
///
/// At most one parse is in flight. Requests arriving meanwhile are folded
/// into a single queued mode that starts once the running parse completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseState {
  #[default]
  Idle,
  /// A parse is wanted but has not been handed to the generator yet.
  Pending(ReparseMode),
  Parsing {
    token: RequestToken,
    mode: ReparseMode,
    queued: Option<ReparseMode>,
  },
}

impl ParseState {
  /// Record a request for `mode`, escalating whatever is already waiting.
  pub fn request(&mut self, mode: ReparseMode) {
    match self {
      Self::Idle => *self = Self::Pending(mode),
      Self::Pending(pending) => *pending = (*pending).max(mode),
      Self::Parsing { queued, .. } => *queued = Some(queued.map_or(mode, |q| q.max(mode))),
    }
  }

  /// Mode waiting to be dispatched, if the generator is free.
  pub fn pending(&self) -> Option<ReparseMode> {
    match self {
      Self::Pending(mode) => Some(*mode),
      _ => None,
    }
  }

  /// Token of the parse in flight.
  pub fn in_flight(&self) -> Option<RequestToken> {
    match self {
      Self::Parsing { token, .. } => Some(*token),
      _ => None,
    }
  }

  /// Finish the parse identified by `token`.
  ///
  /// Returns false, leaving the state untouched, when `token` is not the
  /// parse in flight. Otherwise a queued request becomes pending.
  pub fn complete(&mut self, token: RequestToken) -> bool {
    match *self {
      Self::Parsing {
        token: current, queued, ..
      } if current == token => {
        *self = queued.map_or(Self::Idle, Self::Pending);
        true
      }
      _ => false,
    }
  }

  pub fn is_idle(&self) -> bool {
    matches!(self, Self::Idle)
  }
}
