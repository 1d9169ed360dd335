pub mod assistant;
pub mod joining;
pub mod processor;

pub use assistant::GeminiAssistant;
pub use processor::ArabicProcessor;
