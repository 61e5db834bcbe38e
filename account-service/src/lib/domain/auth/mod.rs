pub mod errors;
pub mod ports;
pub mod service;

#[cfg(test)]
pub mod mocks;
