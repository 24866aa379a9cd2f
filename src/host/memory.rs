use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;

use anyhow::Context as _;

use crate::directive::model::TaggedElement;
use crate::foundation::core::{ElementId, Rect, Vec2, Viewport};
use crate::foundation::error::{ScrollStageError, ScrollStageResult};
use crate::host::{Host, OffsetStore, StyleProp};

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// JSON description of a page for [`MemoryHost`].
pub struct PageFixture {
    /// Viewport at load.
    pub viewport: Viewport,
    /// Simulate a touch device.
    #[serde(default)]
    pub touch: bool,
    /// Document height in pixels.
    pub scroll_height: f64,
    /// Smoothed content layer.
    #[serde(default)]
    pub content: Option<ElementId>,
    /// Element layout boxes.
    #[serde(default)]
    pub elements: BTreeMap<u32, Rect>,
    /// Tagged elements in DOM order.
    #[serde(default)]
    pub directives: Vec<TaggedElement>,
    /// Elements whose pin creation fails.
    #[serde(default)]
    pub failing_pins: Vec<ElementId>,
    /// Make the smoothing probe fail.
    #[serde(default)]
    pub smoothing_unsupported: bool,
}

/// In-memory [`Host`] that records every write.
#[derive(Clone, Debug)]
pub struct MemoryHost {
    pub viewport: Viewport,
    pub touch: bool,
    pub scroll_height: f64,
    pub content: Option<ElementId>,
    pub rects: BTreeMap<ElementId, Rect>,
    pub tagged: Vec<TaggedElement>,
    pub failing_pins: BTreeSet<ElementId>,
    pub smoothing_unsupported: bool,

    pub styles: HashMap<(ElementId, StyleProp), f64>,
    pub write_count: u64,
    pub pins: BTreeMap<ElementId, f64>,
    pub pins_created: u64,
    pub followers: BTreeMap<(ElementId, String), Vec2>,
    pub native_scroll: f64,
    pub manual_restoration_calls: u32,
}

impl MemoryHost {
    pub fn new(viewport: Viewport, scroll_height: f64) -> Self {
        Self {
            viewport,
            touch: false,
            scroll_height,
            content: None,
            rects: BTreeMap::new(),
            tagged: Vec::new(),
            failing_pins: BTreeSet::new(),
            smoothing_unsupported: false,
            styles: HashMap::new(),
            write_count: 0,
            pins: BTreeMap::new(),
            pins_created: 0,
            followers: BTreeMap::new(),
            native_scroll: 0.0,
            manual_restoration_calls: 0,
        }
    }

    pub fn from_fixture(fixture: PageFixture) -> Self {
        let mut host = Self::new(fixture.viewport, fixture.scroll_height);
        host.touch = fixture.touch;
        host.content = fixture.content;
        host.rects = fixture
            .elements
            .into_iter()
            .map(|(id, rect)| (ElementId(id), rect))
            .collect();
        host.tagged = fixture.directives;
        host.failing_pins = fixture.failing_pins.into_iter().collect();
        host.smoothing_unsupported = fixture.smoothing_unsupported;
        host
    }

    pub fn from_json(json: &str) -> ScrollStageResult<Self> {
        let fixture: PageFixture = serde_json::from_str(json)?;
        Ok(Self::from_fixture(fixture))
    }

    /// Load a page fixture file.
    pub fn from_path(path: &Path) -> ScrollStageResult<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("open page fixture '{}'", path.display()))?;
        Self::from_json(&json)
    }

    pub fn style(&self, element: ElementId, prop: StyleProp) -> Option<f64> {
        self.styles.get(&(element, prop)).copied()
    }

    pub fn set_rect(&mut self, element: ElementId, rect: Rect) {
        self.rects.insert(element, rect);
    }
}

impl Host for MemoryHost {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn is_touch_device(&self) -> bool {
        self.touch
    }

    fn probe_smoothing(&self) -> ScrollStageResult<()> {
        if self.smoothing_unsupported {
            return Err(ScrollStageError::host("smoothed transform unsupported"));
        }
        Ok(())
    }

    fn directives(&self) -> Vec<TaggedElement> {
        self.tagged.clone()
    }

    fn element_rect(&self, element: ElementId) -> Option<Rect> {
        self.rects.get(&element).copied()
    }

    fn scroll_height(&self) -> f64 {
        self.scroll_height
    }

    fn content_element(&self) -> Option<ElementId> {
        self.content
    }

    fn create_pin(&mut self, element: ElementId, spacing_px: f64) -> ScrollStageResult<()> {
        if self.failing_pins.contains(&element) {
            return Err(ScrollStageError::host(format!(
                "pin primitive rejected element {element}"
            )));
        }
        self.pins.insert(element, spacing_px);
        self.pins_created += 1;
        Ok(())
    }

    fn release_pin(&mut self, element: ElementId) {
        self.pins.remove(&element);
    }

    fn write_style(&mut self, element: ElementId, prop: StyleProp, value: f64) {
        self.styles.insert((element, prop), value);
        self.write_count += 1;
    }

    fn write_follower(&mut self, container: ElementId, key: &str, offset: Vec2) {
        self.followers.insert((container, key.to_owned()), offset);
    }

    fn scroll_native_to(&mut self, offset: f64) {
        self.native_scroll = offset;
    }

    fn set_manual_scroll_restoration(&mut self) -> ScrollStageResult<()> {
        self.manual_restoration_calls += 1;
        Ok(())
    }
}

/// In-memory [`OffsetStore`].
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    pub values: BTreeMap<String, f64>,
}

impl OffsetStore for MemoryStore {
    fn load(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied()
    }

    fn save(&mut self, key: &str, value: f64) {
        self.values.insert(key.to_owned(), value);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/memory.rs"]
mod tests;
