pub(crate) mod section;
pub(crate) mod tracker;
