pub(crate) mod observer;
pub(crate) mod stagger;
pub(crate) mod typing;
