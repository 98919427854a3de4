use serde::{Deserialize, Serialize};

use crate::error::RelayError;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub prompt: Option<String>,
}

impl ChatRequest {
    pub fn validated_prompt(&self) -> Result<&str, RelayError> {
        let prompt = self.prompt.as_deref().ok_or(RelayError::MissingPrompt)?.trim();
        if prompt.is_empty() {
            return Err(RelayError::EmptyPrompt);
        }
        Ok(prompt)
    }
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(prompt: Option<&str>) -> ChatRequest {
        ChatRequest {
            prompt: prompt.map(str::to_string),
        }
    }

    #[test]
    fn trims_prompt() {
        assert_eq!(request(Some("  Hello \n")).validated_prompt().unwrap(), "Hello");
    }

    #[test]
    fn rejects_missing_and_blank_prompts() {
        assert!(matches!(
            request(None).validated_prompt(),
            Err(RelayError::MissingPrompt)
        ));
        assert!(matches!(
            request(Some(" \t ")).validated_prompt(),
            Err(RelayError::EmptyPrompt)
        ));
    }
}
