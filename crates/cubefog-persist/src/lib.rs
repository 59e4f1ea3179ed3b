pub mod error;
pub mod exr;
pub mod store;

pub use error::PersistError;
pub use exr::{decode_exr, encode_exr};
pub use store::{DirectoryStore, LoadedCubemap};
