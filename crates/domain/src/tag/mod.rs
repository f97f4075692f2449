mod element_type;
mod result;
mod tag_ref;
mod tag_spec;

pub use element_type::ElementType;
pub use result::{ReadResult, WriteResult};
pub use tag_ref::{TagRef, same_tag};
pub use tag_spec::TagSpec;
