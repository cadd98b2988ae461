pub(crate) mod features;
pub(crate) mod predict;
pub(crate) mod schemes;
