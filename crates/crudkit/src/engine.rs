pub(crate) mod create;
pub(crate) mod fields;
pub(crate) mod payload;
pub(crate) mod pivot;
pub(crate) mod tree;
