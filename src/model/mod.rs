pub(crate) mod highlight;
pub(crate) mod response;
