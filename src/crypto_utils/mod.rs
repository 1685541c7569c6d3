pub mod signature;

pub use signature::HmacSignature;
