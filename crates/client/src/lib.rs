pub mod client;
pub mod signer;

pub use client::*;
pub use signer::*;
