pub mod image;
pub mod text;
pub mod view;

pub use image::*;
pub use text::*;
pub use view::*;
