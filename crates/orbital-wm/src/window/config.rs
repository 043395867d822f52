//! Window creation parameters

use crate::math::Rect;

/// Parameters for [`WindowStore::create`](super::WindowStore::create)
#[derive(Clone, Debug, Default)]
pub struct WindowConfig {
    /// Application hosted by the window
    pub app_id: String,
    /// Initial title (defaults to the app id when empty)
    pub title: String,
    /// Initial bounds; cascaded from the store default when `None`
    pub bounds: Option<Rect>,
}

impl WindowConfig {
    /// Config for `app_id` with default title and bounds
    pub fn for_app(app_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            ..Default::default()
        }
    }

    /// Set the initial bounds
    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = Some(bounds);
        self
    }
}
