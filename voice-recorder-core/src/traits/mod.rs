pub mod capture_device;
pub mod decoder;
pub mod export;
pub mod player;
pub mod recorder_delegate;
