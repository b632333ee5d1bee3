pub mod checking;
pub mod landing;
