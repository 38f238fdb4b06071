//! Similar-title recommendations.

use crate::models::media::MediaKind;
use crate::services::gemini::Recommender;
use crate::Error;

/// Shown when the response arrives but has no text.
pub const MALFORMED_RESPONSE_TEXT: &str = "Could not fetch recommendations.";

/// Shown when the request itself fails.
pub const REQUEST_FAILED_TEXT: &str = "Error generating recommendations.";

/// Prompt asking for titles similar to `title`.
pub fn build_prompt(title: &str, kind: MediaKind) -> String {
    let noun = kind.noun();
    format!(
        "Suggest a few popular {noun} titles that are similar in genre or theme to \"{title}\". \
         Provide only the {noun} titles, separated by commas."
    )
}

/// Ask `recommender` for similar titles and return the text to display.
///
/// The generated text is returned verbatim; any failure maps to a fixed message.
pub async fn recommend(recommender: &dyn Recommender, title: &str, kind: MediaKind) -> String {
    let prompt = build_prompt(title, kind);
    match recommender.generate(&prompt).await {
        Ok(text) => text,
        Err(Error::UnexpectedResponse(source)) => {
            tracing::warn!("Malformed response from {}", source);
            MALFORMED_RESPONSE_TEXT.to_string()
        }
        Err(e) => {
            tracing::warn!("Recommendation request failed: {}", e);
            REQUEST_FAILED_TEXT.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Result;
    use async_trait::async_trait;

    struct Fixed(fn() -> Result<String>);

    #[async_trait]
    impl Recommender for Fixed {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            (self.0)()
        }
    }

    #[test]
    fn test_prompt_mentions_title_and_kind() {
        let prompt = build_prompt("Severance", MediaKind::Tv);
        assert!(prompt.contains("\"Severance\""));
        assert!(prompt.contains("TV show titles"));
        assert!(prompt.contains("separated by commas"));
    }

    #[tokio::test]
    async fn test_text_returned_verbatim() {
        let rec = Fixed(|| Ok(" Heat,Ronin ,  Collateral\n".to_string()));
        assert_eq!(
            recommend(&rec, "Thief", MediaKind::Movie).await,
            " Heat,Ronin ,  Collateral\n"
        );
    }

    #[tokio::test]
    async fn test_failures_map_to_fixed_text() {
        let malformed = Fixed(|| Err(Error::UnexpectedResponse("test".to_string())));
        assert_eq!(
            recommend(&malformed, "Thief", MediaKind::Movie).await,
            MALFORMED_RESPONSE_TEXT
        );

        let failed = Fixed(|| Err(Error::other("connection refused")));
        assert_eq!(
            recommend(&failed, "Thief", MediaKind::Movie).await,
            REQUEST_FAILED_TEXT
        );
    }
}
