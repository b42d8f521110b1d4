//! Seams between the card stack and its collaborators.

use crate::types::CardRecord;

/// The data source the card stack reads from.
///
/// `records` is append-only with a stable order for the lifetime of a session.
/// The stack keeps nothing but its own cursor into it and reads the latest
/// snapshot on every call.
pub trait RepositoryFeed {
    type Record: CardRecord;

    fn records(&self) -> &[Self::Record];

    /// True while a "fetch more" request is in flight.
    fn is_fetching_more(&self) -> bool;

    /// Asks for the next page. Fire-and-forget; may be a no-op.
    fn request_more(&mut self);
}

/// Opens a URL outside the application.
///
/// Best effort: implementations swallow their own failures.
pub trait LinkOpener {
    fn open_external(&self, url: &str);
}

/// Opener that does nothing. Used by headless sessions.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLinkOpener;

impl LinkOpener for NoopLinkOpener {
    fn open_external(&self, url: &str) {
        tracing::trace!(url, "link opening disabled");
    }
}
