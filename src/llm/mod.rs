//! LLM Provider Clients and Abstractions
//!
//! This module provides a unified interface for the language-model collaborator.
//! The planner, the specialist agents and the search summarizer all talk to the
//! model through the same [`LLMClient`] trait, so the provider can be swapped in
//! `jarvis.toml` without touching the routing code.
//!
//! # Supported Providers
//!
//! Enable providers via Cargo features:
//! - `openai` - OpenAI-compatible APIs (Groq by default)
//! - `ollama` - Local Ollama server

/// Core LLM client trait, provider selection and factory.
pub mod client;

#[cfg(feature = "ollama")]
pub mod ollama;

#[cfg(feature = "openai")]
pub mod openai;

pub use client::{LLMClient, LLMClientFactory, ModelParams, Provider, TextStream};
