use std::time::Duration;

use mealmate_core::error::ProviderError;
use mealmate_core::models::{RecipeDetails, RecipeSummary};
use mealmate_core::service::RecipeCatalogProvider;
use mealmate_core::spoonacular::{
    InformationResponse, SearchResponse, information_to_details, search_response_to_summaries,
};

const SEARCH_URL: &str = "https://api.spoonacular.com/recipes/complexSearch";
const INFORMATION_URL: &str = "https://api.spoonacular.com/recipes";

pub struct SpoonacularClient {
    client: reqwest::Client,
    api_key: String,
    rt: tokio::runtime::Handle,
}

impl SpoonacularClient {
    pub fn new(api_key: String) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(format!(
                "mealmate-cli/{} (meal planner)",
                env!("CARGO_PKG_VERSION")
            ))
            .timeout(Duration::from_secs(10))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .expect("Failed to build HTTP client");
        Self {
            client,
            api_key,
            rt: tokio::runtime::Handle::current(),
        }
    }

    pub async fn search_async(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<RecipeSummary>, ProviderError> {
        let resp = self
            .client
            .get(SEARCH_URL)
            .query(&[
                ("query", query),
                ("number", &limit.to_string()),
                ("apiKey", &self.api_key),
            ])
            .send()
            .await
            .map_err(|e| ProviderError::Unavailable(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ProviderError::Unavailable(format!(
                "catalog search returned {status}"
            )));
        }

        let data: SearchResponse = resp
            .json()
            .await
            .map_err(|e| ProviderError::Unavailable(format!("bad search response: {e}")))?;

        Ok(search_response_to_summaries(data))
    }

    pub async fn fetch_details_async(
        &self,
        external_id: &str,
    ) -> Result<RecipeDetails, ProviderError> {
        let url = format!("{INFORMATION_URL}/{external_id}/information");
        let resp = self
            .client
            .get(&url)
            .query(&[("includeNutrition", "true"), ("apiKey", &self.api_key)])
            .send()
            .await
            .map_err(|e| ProviderError::Unavailable(e.to_string()))?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ProviderError::NotFound);
        }
        if !status.is_success() {
            return Err(ProviderError::Unavailable(format!(
                "catalog details returned {status}"
            )));
        }

        let data: InformationResponse = resp
            .json()
            .await
            .map_err(|e| ProviderError::Unavailable(format!("bad details response: {e}")))?;

        Ok(information_to_details(data))
    }
}

impl RecipeCatalogProvider for SpoonacularClient {
    fn search(&self, query: &str, limit: u32) -> Result<Vec<RecipeSummary>, ProviderError> {
        self.rt.block_on(self.search_async(query, limit))
    }

    fn fetch_details(&self, external_id: &str) -> Result<RecipeDetails, ProviderError> {
        self.rt.block_on(self.fetch_details_async(external_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- Integration tests (hit the real Spoonacular API, need a key) ---

    fn live_client() -> Option<SpoonacularClient> {
        std::env::var("SPOONACULAR_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .map(SpoonacularClient::new)
    }

    #[tokio::test]
    #[ignore = "hits Spoonacular API"]
    async fn test_search_returns_results() {
        let Some(client) = live_client() else { return };
        let results = client.search_async("chicken", 10).await.unwrap();
        assert!(!results.is_empty());
        for summary in &results {
            assert!(!summary.external_id.is_empty());
            assert!(!summary.title.is_empty());
        }
    }

    #[tokio::test]
    #[ignore = "hits Spoonacular API"]
    async fn test_fetch_details_unknown_id() {
        let Some(client) = live_client() else { return };
        let result = client.fetch_details_async("0").await;
        assert!(matches!(result, Err(ProviderError::NotFound)));
    }
}
