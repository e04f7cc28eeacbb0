//! Implementações específicas de dispositivos

pub mod simple;

pub use simple::{SimpleCharDevice, BUFFER_SIZE, IOCTL_CLEAR_BUFFER};
