/// Trailing-edge debounce over the frame clock.
///
/// Every [`notify`](Self::notify) pushes the deadline out; [`poll`](Self::poll) fires once the
/// clock passes it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Debounce {
    delay_s: f64,
    deadline: Option<f64>,
}

impl Debounce {
    pub fn new(delay_s: f64) -> Self {
        Self {
            delay_s: delay_s.max(0.0),
            deadline: None,
        }
    }

    pub fn notify(&mut self, now_s: f64) {
        self.deadline = Some(now_s + self.delay_s);
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn poll(&mut self, now_s: f64) -> bool {
        match self.deadline {
            Some(deadline) if now_s >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/recovery/debounce.rs"]
mod tests;
