//! Reparse coordination.
//!
//! Every change source (kit, activation, environment, build directory,
//! configuration edits, project files) and every generator completion is an
//! [`Event`]. A [`ReparseCoordinator`] turns events into at most one running
//! parse per build configuration, escalating the requested [`ReparseMode`]
//! while a parse is pending or in flight, and applies the parse results to
//! its [`BuildConfiguration`](crate::build_config::BuildConfiguration).
//!
//! Completions are correlated with the request that started them through a
//! [`RequestToken`]; reports for anything but the parse in flight are
//! dropped.

mod coordinator;
mod event;
mod event_loop;
mod generator;
mod state;

pub use coordinator::ReparseCoordinator;
pub use event::{Event, ReparseMode, RequestToken};
pub use event_loop::{EventLoop, EventReceiver, EventSender, channel};
pub use generator::{Generator, GeneratorError, ParseParameters, ProjectBuildSystem, ProjectNode};
pub use state::ParseState;
