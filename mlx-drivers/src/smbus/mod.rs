//! SMBus transports
//!
//! Both backends implement [`mlx_core::SmbusTransport`] and plug into
//! [`mlx_core::Mlx90614`]; PEC and framing live there.

pub mod bitbang;
pub mod hardware;

pub use bitbang::{BitBangMlx90614, BitBangSmbus};
pub use hardware::{HardwareMlx90614, HardwareSmbus};
