pub mod file_share;
pub mod mounted_share;
pub mod secrets;
#[cfg(feature = "smb")]
pub mod smb_share;
