pub mod generate;

pub use generate::generate_image;
