pub(crate) mod expansion;
pub(crate) mod visibility;
