//! The seam between the runtime and the page it animates.
//!
//! A browser binding implements [`Host`] over the DOM; [`memory::MemoryHost`] implements it in
//! memory for tests and the CLI. Every externally visible effect of the runtime is a call on this
//! trait.

pub(crate) mod memory;

use crate::directive::model::TaggedElement;
use crate::foundation::core::{ElementId, Rect, Vec2, Viewport};
use crate::foundation::error::ScrollStageResult;

/// Storage key for the persisted scroll offset.
pub const LAST_OFFSET_KEY: &str = "scrollstage.last-scroll-offset";

/// Style properties the runtime writes.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum StyleProp {
    /// Opacity in `[0, 1]`.
    Opacity,
    /// 1 visible, 0 hidden. Written alongside every opacity write.
    Visibility,
    /// Horizontal translation in pixels.
    X,
    /// Vertical translation in pixels.
    Y,
    /// Horizontal translation as a percentage of the element width.
    XPercent,
    /// Vertical translation as a percentage of the element height.
    YPercent,
    /// Uniform scale.
    Scale,
    /// Stacking order.
    ZIndex,
    /// Vertical translation of the smoothed content layer (negated offset).
    ContentY,
    /// Counter-translation keeping a pinned element fixed while its window is active.
    PinShift,
}

impl StyleProp {
    /// Value an element has before anything writes this property.
    pub fn identity(self) -> f64 {
        match self {
            Self::Opacity | Self::Visibility | Self::Scale => 1.0,
            _ => 0.0,
        }
    }
}

/// One queued style mutation.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct StyleWrite {
    pub element: ElementId,
    pub prop: StyleProp,
    pub value: f64,
}

/// Page environment the runtime reads from and writes to.
pub trait Host {
    /// Current layout viewport.
    fn viewport(&self) -> Viewport;

    /// `true` on touch-class devices (native momentum scrolling, no smoothing).
    fn is_touch_device(&self) -> bool;

    /// Feature detection for the smoothed transform. An error falls back to native scrolling.
    fn probe_smoothing(&self) -> ScrollStageResult<()>;

    /// Directive-tagged elements in DOM order.
    fn directives(&self) -> Vec<TaggedElement>;

    /// Document-space layout box of `element`, or `None` if it is not in the DOM.
    fn element_rect(&self, element: ElementId) -> Option<Rect>;

    /// Total scrollable document height, excluding pin spacing.
    fn scroll_height(&self) -> f64;

    /// The layer the smoothed transform is applied to.
    fn content_element(&self) -> Option<ElementId>;

    /// Create the pin primitive for `element`, reserving `spacing_px` of scroll after it.
    fn create_pin(&mut self, element: ElementId, spacing_px: f64) -> ScrollStageResult<()>;

    /// Remove a pin created by [`Host::create_pin`]. Unknown elements are ignored.
    fn release_pin(&mut self, element: ElementId);

    fn write_style(&mut self, element: ElementId, prop: StyleProp, value: f64);

    /// Position the marker of follower `key` inside `container`, relative to its anchor centre.
    fn write_follower(&mut self, container: ElementId, key: &str, offset: Vec2);

    /// Move the native scroll position.
    fn scroll_native_to(&mut self, offset: f64);

    /// Stop the browser from restoring scroll on its own.
    fn set_manual_scroll_restoration(&mut self) -> ScrollStageResult<()>;
}

/// Client-local storage for the single persisted scalar.
pub trait OffsetStore {
    fn load(&self, key: &str) -> Option<f64>;
    fn save(&mut self, key: &str, value: f64);
}
