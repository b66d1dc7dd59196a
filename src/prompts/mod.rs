pub mod fallback;
pub mod synthesizer;

pub use fallback::{synthesize_fallback, target_band};
pub use synthesizer::{percentage, synthesize_prompt};
