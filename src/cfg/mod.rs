//! Darknet cfg text: section records and the line reader that produces them.

pub mod reader;
pub mod section;
pub mod value;

pub use reader::read;
pub use section::Section;
pub use value::leading_int;
