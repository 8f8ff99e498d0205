//! Concrete transports for [`swipecon_core::NativeBridge`].

pub mod http;
