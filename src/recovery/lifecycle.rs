/// Page visibility state.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Lifecycle {
    Running,
    /// Hidden; holds the offset to replay on resume.
    Frozen { saved_offset: f64 },
}

/// What the runtime must do after a visibility or page-show event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Recovery {
    /// Pause smoothing, disable observers and the spring loop.
    Freeze,
    /// Re-enable observers, re-measure, seek to `offset` without animating, then resume.
    Resume { offset: f64 },
    /// Restored from the navigation cache: start over from the top.
    ResetToTop,
}

/// `RUNNING ⇄ FROZEN` state machine.
#[derive(Debug)]
pub struct LifecycleState {
    state: Lifecycle,
}

impl Default for LifecycleState {
    fn default() -> Self {
        Self {
            state: Lifecycle::Running,
        }
    }
}

impl LifecycleState {
    pub fn state(&self) -> Lifecycle {
        self.state
    }

    pub fn is_frozen(&self) -> bool {
        matches!(self.state, Lifecycle::Frozen { .. })
    }

    pub fn on_visibility_change(&mut self, hidden: bool, offset: f64) -> Option<Recovery> {
        match (self.state, hidden) {
            (Lifecycle::Running, true) => {
                self.state = Lifecycle::Frozen {
                    saved_offset: offset,
                };
                tracing::debug!(offset, "page hidden, freezing");
                Some(Recovery::Freeze)
            }
            (Lifecycle::Frozen { saved_offset }, false) => {
                self.state = Lifecycle::Running;
                tracing::debug!(offset = saved_offset, "page visible, resuming");
                Some(Recovery::Resume {
                    offset: saved_offset,
                })
            }
            _ => None,
        }
    }

    /// A page show that came from the navigation cache discards any frozen offset.
    pub fn on_page_show(&mut self, persisted: bool) -> Option<Recovery> {
        if !persisted {
            return None;
        }
        self.state = Lifecycle::Running;
        tracing::debug!("page restored from cache, resetting to top");
        Some(Recovery::ResetToTop)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/recovery/lifecycle.rs"]
mod tests;
