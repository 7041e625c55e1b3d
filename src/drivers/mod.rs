#[path = "../../drivers/usb/mod.rs"]
pub mod usb;
