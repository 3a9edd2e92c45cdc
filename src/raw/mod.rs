mod arena;
mod handle;
mod level;
mod node;
mod raw_skip_set;

pub(crate) use handle::Handle;
pub(crate) use raw_skip_set::RawSkipSet;
