//! Generator provider factory.
//!
//! This module creates generator clients from application configuration. It
//! handles provider resolution and API key checks.

use crate::client::Generator;
use crate::providers::{OllamaGenerator, OpenAiGenerator};
use std::sync::Arc;

/// Create a generator based on the provider name.
///
/// # Arguments
/// * `provider` - Provider identifier ("ollama", "openai")
/// * `endpoint` - Optional custom endpoint URL
/// * `api_key` - Optional API key (for providers that require it)
///
/// # Returns
/// A shared trait object implementing [`Generator`]
///
/// # Errors
/// Returns error if the provider is unknown or a required API key is missing.
pub fn create_generator(
    provider: &str,
    endpoint: Option<&str>,
    api_key: Option<&str>,
) -> Result<Arc<dyn Generator>, String> {
    match provider.to_lowercase().as_str() {
        "ollama" => {
            let base_url = endpoint.unwrap_or("http://localhost:11434");
            let generator = OllamaGenerator::with_base_url(base_url);
            Ok(Arc::new(generator))
        }
        "openai" => {
            let api_key = api_key.ok_or_else(|| "OpenAI provider requires API key".to_string())?;
            let generator = match endpoint {
                Some(url) => OpenAiGenerator::with_base_url(api_key, url),
                None => OpenAiGenerator::new(api_key),
            };
            Ok(Arc::new(generator))
        }
        _ => Err(format!("Unknown provider: {}", provider)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_ollama_generator() {
        let generator = create_generator("ollama", None, None);
        assert!(generator.is_ok());
    }

    #[test]
    fn test_create_ollama_with_custom_endpoint() {
        let generator = create_generator("ollama", Some("http://localhost:8080"), None);
        assert!(generator.is_ok());
    }

    #[test]
    fn test_openai_requires_api_key() {
        match create_generator("openai", None, None) {
            Err(err) => assert!(err.contains("OpenAI provider requires API key")),
            Ok(_) => panic!("Expected error for OpenAI without API key"),
        }
    }

    #[test]
    fn test_create_openai_with_key() {
        let generator = create_generator("openai", None, Some("sk-test"));
        assert!(generator.is_ok());
        assert_eq!(generator.unwrap().provider_name(), "openai");
    }

    #[test]
    fn test_unknown_provider() {
        match create_generator("unknown", None, None) {
            Err(err) => assert!(err.contains("Unknown provider")),
            Ok(_) => panic!("Expected error for unknown provider"),
        }
    }
}
