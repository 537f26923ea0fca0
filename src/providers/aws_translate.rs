// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! AWS Translate provider

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_translate::error::DisplayErrorContext;
use aws_sdk_translate::Client;
use tracing::debug;

use super::translator::Translator;
use super::types::ProviderError;
use crate::config::LanguagePair;

const PROVIDER_NAME: &str = "translate";

/// Translator backed by AWS Translate `TranslateText`
pub struct AwsTranslator {
    client: Client,
}

impl AwsTranslator {
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self {
            client: Client::new(sdk_config),
        }
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Translator for AwsTranslator {
    async fn translate(
        &self,
        text: &str,
        languages: &LanguagePair,
    ) -> Result<String, ProviderError> {
        if text.trim().is_empty() {
            return Err(ProviderError::invalid_input(PROVIDER_NAME, "text is empty"));
        }

        let output = self
            .client
            .translate_text()
            .text(text)
            .source_language_code(&languages.source)
            .target_language_code(&languages.target)
            .send()
            .await
            .map_err(|e| ProviderError::request(PROVIDER_NAME, DisplayErrorContext(&e).to_string()))?;

        let translated = output.translated_text().trim();
        if translated.is_empty() {
            return Err(ProviderError::empty_result(PROVIDER_NAME));
        }

        debug!("Translated '{}' -> '{}' ({})", text, translated, languages);
        Ok(translated.to_string())
    }

    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }
}
