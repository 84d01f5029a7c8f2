//! Cancel-and-restart render passes.
//!
//! Every pass takes a ticket carrying a generation number. Starting a new
//! pass bumps the generation, which makes any older pass stale: it stops at
//! its next bucket boundary and is never published. Readers only ever see
//! the last completed current pass.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use prism_core::Scene;

use crate::buffer::ImageBuffer;
use crate::renderer::{render_with_cancel, RenderConfig};

/// Handle for one pass of a [`RenderSession`].
#[derive(Debug, PartialEq, Eq)]
pub struct PassTicket {
    generation: u64,
}

impl PassTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Serializes re-render requests for one output.
#[derive(Debug, Default)]
pub struct RenderSession {
    generation: AtomicU64,
    latest: Mutex<Option<Arc<ImageBuffer>>>,
}

impl RenderSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a pass, invalidating every earlier one.
    pub fn begin(&self) -> PassTicket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        log::debug!("Starting render pass {}", generation);
        PassTicket { generation }
    }

    /// Invalidate the running pass without starting another.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Check if `ticket` belongs to the newest pass.
    pub fn is_current(&self, ticket: &PassTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.generation
    }

    /// Publish a finished pass if it is still current.
    ///
    /// Returns the published buffer, or `None` if a newer pass started.
    pub fn publish(&self, ticket: PassTicket, image: ImageBuffer) -> Option<Arc<ImageBuffer>> {
        let mut latest = self.latest.lock().unwrap_or_else(PoisonError::into_inner);

        // Checked under the lock so an older pass can't overwrite a newer one
        if !self.is_current(&ticket) {
            log::debug!("Discarding stale render pass {}", ticket.generation);
            return None;
        }

        let image = Arc::new(image);
        *latest = Some(Arc::clone(&image));
        Some(image)
    }

    /// Run a full pass and publish it.
    ///
    /// Returns `None` if the pass was superseded before it finished.
    pub fn render(&self, scene: &Scene, config: &RenderConfig) -> Option<Arc<ImageBuffer>> {
        let ticket = self.begin();
        let image = render_with_cancel(scene, config, || !self.is_current(&ticket))?;
        self.publish(ticket, image)
    }

    /// The last published buffer.
    pub fn latest(&self) -> Option<Arc<ImageBuffer>> {
        self.latest
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_core::{demo_scene, RenderSettings};

    #[test]
    fn test_render_publishes() {
        let session = RenderSession::new();
        assert!(session.latest().is_none());

        let scene = demo_scene(1.0);
        let config = RenderConfig::new(16, 16, RenderSettings::default());
        let image = session.render(&scene, &config).unwrap();

        assert_eq!(image.dimensions(), (16, 16));
        assert!(Arc::ptr_eq(&image, &session.latest().unwrap()));
    }

    #[test]
    fn test_stale_pass_never_published() {
        let session = RenderSession::new();
        let older = session.begin();
        let newer = session.begin();

        assert!(!session.is_current(&older));
        assert!(session.publish(older, ImageBuffer::new(1, 1)).is_none());
        assert!(session.latest().is_none());

        assert!(session.publish(newer, ImageBuffer::new(2, 2)).is_some());
        assert_eq!(session.latest().unwrap().dimensions(), (2, 2));
    }

    #[test]
    fn test_cancel_keeps_previous_result() {
        let session = RenderSession::new();
        let first = session.begin();
        session.publish(first, ImageBuffer::new(3, 3)).unwrap();

        let second = session.begin();
        session.cancel();
        assert!(session.publish(second, ImageBuffer::new(4, 4)).is_none());
        assert_eq!(session.latest().unwrap().dimensions(), (3, 3));
    }

    #[test]
    fn test_generations_increase() {
        let session = RenderSession::new();
        let a = session.begin();
        let b = session.begin();
        assert!(b.generation() > a.generation());
    }
}
