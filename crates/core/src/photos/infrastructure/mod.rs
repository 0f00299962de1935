pub mod image_photo_reader;
pub mod photo_library;
