use crate::error::PagerError;

pub type PagerResult<T> = Result<T, PagerError>;
