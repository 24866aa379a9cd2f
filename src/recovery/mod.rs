//! Tab backgrounding, cached-page restores and resize bursts.

pub(crate) mod debounce;
pub(crate) mod lifecycle;
