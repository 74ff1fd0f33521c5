pub mod adb;
pub mod device;
pub mod file;

pub use adb::Adb;
pub use device::{parse_listing, remote_path, AdbStorage, DeviceStorage};
pub use file::{has_extension, hash_file, list_originals, remove_if_exists};
