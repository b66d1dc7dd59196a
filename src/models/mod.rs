pub mod base;
pub mod ollama;

pub use base::GenerativeBackend;
