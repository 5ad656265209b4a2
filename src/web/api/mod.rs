pub mod beacon;
pub mod decode;
pub mod error;
