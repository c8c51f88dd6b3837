//! Gemini `generateContent` adapter for the generation port

mod client;
mod types;

pub use client::GeminiClient;
