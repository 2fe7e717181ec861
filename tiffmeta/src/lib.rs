pub mod embed;
pub mod error;
pub mod icc;
pub mod image_file;
pub mod mode;
pub mod report;
pub mod summary;
pub mod tags;
pub mod value;

#[cfg(test)]
mod testing;

pub use image_file::ImageFile;
pub use summary::{summarize, DisplayValue};
pub use value::{Rational, TagValue};
