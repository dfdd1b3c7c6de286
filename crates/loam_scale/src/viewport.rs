//! Viewport - the shared reference dimensions

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Reference screen dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub width: f32,
    pub height: f32,
}

/// Callback invoked after the viewport changes size
pub type ResizeHook = Box<dyn FnMut(Extent) + Send>;

struct ViewportInner {
    extent: RwLock<Extent>,
    hooks: Mutex<Vec<ResizeHook>>,
}

/// Cheaply cloneable handle to the reference dimensions.
///
/// Plays two roles: the dimension provider every [`Scaled`] value resolves
/// against, and the resize-notification list walked when the window
/// changes size. There is no process-wide instance; the simulation context
/// owns one and passes the handle down, so tests stay isolated.
///
/// [`Scaled`]: crate::scaled::Scaled
#[derive(Clone)]
pub struct Viewport {
    inner: Arc<ViewportInner>,
}

impl Viewport {
    /// Create a viewport with the given reference dimensions
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            inner: Arc::new(ViewportInner {
                extent: RwLock::new(Extent { width, height }),
                hooks: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Current reference dimensions
    pub fn extent(&self) -> Extent {
        *self.inner.extent.read()
    }

    /// Current reference width
    pub fn width(&self) -> f32 {
        self.inner.extent.read().width
    }

    /// Current reference height
    pub fn height(&self) -> f32 {
        self.inner.extent.read().height
    }

    /// Change the reference dimensions, then walk the resize hooks in
    /// registration order.
    pub fn resize(&self, width: f32, height: f32) {
        let extent = Extent { width, height };
        *self.inner.extent.write() = extent;
        for hook in self.inner.hooks.lock().iter_mut() {
            hook(extent);
        }
    }

    /// Register a hook to run on every resize.
    ///
    /// Used by layout code that caches absolute values; plain [`Scaled`]
    /// values need no hook since they resolve on read.
    ///
    /// [`Scaled`]: crate::scaled::Scaled
    pub fn on_resize<F>(&self, hook: F)
    where
        F: FnMut(Extent) + Send + 'static,
    {
        self.inner.hooks.lock().push(Box::new(hook));
    }
}

impl std::fmt::Debug for Viewport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let extent = self.extent();
        f.debug_struct("Viewport")
            .field("width", &extent.width)
            .field("height", &extent.height)
            .field("hooks", &self.inner.hooks.lock().len())
            .finish()
    }
}
