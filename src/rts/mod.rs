//! Runtime side of the mixer: everything that talks to a device

pub mod hardware;
