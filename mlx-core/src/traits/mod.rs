//! Hardware abstraction traits
//!
//! These traits define the interface between the protocol logic and the
//! transport implementations in `mlx-drivers`.

pub mod transport;

pub use transport::{SmbusTransport, READ_FRAME_LEN};
