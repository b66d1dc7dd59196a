pub mod coach;
pub mod ollama;
pub mod perf;
