//! Card-stack progression engine and GitHub search plumbing for githubba.
//!
//! The engine ([`stack::CardStack`] and the components it composes) is I/O
//! free: it reads repository snapshots through [`feed::RepositoryFeed`], opens
//! links through [`feed::LinkOpener`] and reports elapsed animation timers
//! through a [`timer::TimerSink`]. The [`github`] and [`search`] modules are the
//! data-source side that the binary wires up to it.

pub mod feed;
pub mod feedback;
pub mod gesture;
pub mod github;
pub mod hint;
pub mod pagination;
pub mod search;
pub mod sequencer;
pub mod stack;
pub mod timer;
pub mod types;
