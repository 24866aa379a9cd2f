/// Acquired resources, released in reverse acquisition order.
#[derive(Debug)]
pub struct Scope<R> {
    held: Vec<R>,
}

impl<R> Default for Scope<R> {
    fn default() -> Self {
        Self { held: Vec::new() }
    }
}

impl<R: std::fmt::Debug> Scope<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `resource`; returns its position, which is also its release rank.
    pub fn acquire(&mut self, resource: R) -> usize {
        self.held.push(resource);
        self.held.len() - 1
    }

    pub fn len(&self) -> usize {
        self.held.len()
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }

    /// Hand every resource to `release`, newest first. The scope is empty afterwards.
    pub fn release_all(&mut self, mut release: impl FnMut(R)) {
        while let Some(resource) = self.held.pop() {
            tracing::trace!(?resource, "releasing");
            release(resource);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/scope.rs"]
mod tests;
