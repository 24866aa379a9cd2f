//! Pin regions: sections held in place for a computed scroll distance.

pub(crate) mod region;
pub(crate) mod registry;
