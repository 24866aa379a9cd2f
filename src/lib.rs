//! scrollstage is a scroll and pointer choreography runtime for long-form pages.
//!
//! It decouples the rendered scroll position from native scroll, pins sections for a computed
//! scroll distance, turns a pinned section's progress into discrete stages with enter/exit
//! animations and continuous drift, and runs spring physics for pointer-following markers.
//!
//! # Pipeline overview
//!
//! 1. **Smooth**: raw wheel/native scroll input -> lagged offset (`SmoothScroller`)
//! 2. **Pin**: offset -> per-region progress over `[start, start + duration]` (`PinRegistry`)
//! 3. **Stage**: progress -> stage index, enter/exit tweens and drift (`StageController`)
//! 4. **Flush**: queued style writes -> the page (`Host`)
//!
//! Pointer springs (`PointerSpringEngine`) run in the same frame but never read the scroll state.
//!
//! Every page effect goes through the [`Host`] trait. [`MemoryHost`] implements it in memory and
//! is what the tests and the `scrollstage` CLI run against.
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Degrade, never fail**: page-facing entry points log problems and fall back to simpler
//!   behaviour (native scroll, unpinned sections, no animation) instead of returning errors.
#![forbid(unsafe_code)]

mod animation;
mod directive;
mod foundation;
mod host;
mod physics;
mod pin;
mod recovery;
mod runtime;
mod scroll;
mod stage;

pub use animation::ease::Ease;
pub use animation::tween::{Animator, CompletionTag, TweenEvent, TweenId, TweenSpec};
pub use directive::duration::DurationSpec;
pub use directive::model::{
    DEFAULT_FOLLOWER_SIZE, Directive, FollowerConfig, FollowerDirective, FollowerGroupSpec,
    FollowerMetrics, PinDirective, PinSpec, StageDirective, StageSpec, TaggedElement,
};
pub use directive::start::{Edge, StartSpec};
pub use foundation::core::{ElementId, Point, Rect, Size, Vec2, Viewport};
pub use foundation::error::{ScrollStageError, ScrollStageResult};
pub use foundation::math::{approx_eq, clamp01, inverse_lerp, lerp};
pub use host::memory::{MemoryHost, MemoryStore, PageFixture};
pub use host::{Host, LAST_OFFSET_KEY, OffsetStore, StyleProp, StyleWrite};
pub use physics::engine::{PointerSpringEngine, RADIUS_RATIO};
pub use physics::rng::Rng64;
pub use physics::spring::{FollowerPhysics, SpringParams};
pub use pin::region::{PinMode, PinRegion, PinWindow};
pub use pin::registry::{PinRegistry, ProgressSample, ScanReport};
pub use recovery::debounce::Debounce;
pub use recovery::lifecycle::{Lifecycle, LifecycleState, Recovery};
pub use runtime::config::RuntimeConfig;
pub use runtime::driver::ScrollRuntime;
pub use runtime::env::{RuntimeEnv, RuntimeLease};
pub use runtime::scope::Scope;
pub use scroll::smoother::{NativeReason, ScrollState, SmoothScroller, SmoothingMode};
pub use stage::controller::{StageController, StageTimings, companion_scale};
pub use stage::drift::{base_percent, drift_offset, multiplier};
pub use stage::reveal::{RevealSection, RevealTimings};
pub use stage::{StageEvent, StageSnapshot, stage_for_progress};
