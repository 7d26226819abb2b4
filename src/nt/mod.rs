//! Guest-facing protocol pieces: status vocabulary, tick time, wire
//! structures, and the bitmap bookkeeping primitive.

pub mod bitmap;
pub mod info;
pub mod status;
pub mod time;

pub use bitmap::Bitmap;
pub use info::FileInformationClass;
pub use status::NtStatus;
