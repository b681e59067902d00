//! API client for the alumnet REST backend.
//!
//! One `ApiClient` wraps a shared `reqwest::Client` and an optional
//! bearer token. Clone is cheap - reqwest uses Arc internally for
//! connection pooling - so token-bearing instances are minted with
//! `with_token` instead of rebuilding the pool.

use std::time::Duration;

use reqwest::{header, multipart, Client};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use crate::models::{
    AdminAlumniUpdate, Achievement, AlumniBasics, AlumniRecord, AlumniSummary, DashboardData,
    Education, Employment, FilterCategories, PagedResponse,
};

use super::ApiError;

/// HTTP request timeout in seconds.
/// 30s allows for slow API responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: String,
}

/// Sub-resource kinds addressable under a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    Education,
    Job,
    Achievement,
}

impl EntryKind {
    /// Path segment and `type` discriminator on the wire.
    fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Education => "education",
            EntryKind::Job => "job",
            EntryKind::Achievement => "achievement",
        }
    }
}

/// Body shape for the own-profile sub-resource POST: the entry's own
/// fields plus a `type` discriminator.
#[derive(Serialize)]
struct TaggedEntry<'a, T: Serialize> {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(flatten)]
    entry: &'a T,
}

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new API client against the given base URL
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Set the bearer token for authenticated requests
    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    /// Drop the bearer token, reverting to unauthenticated requests
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    /// Create a new ApiClient with the given token, sharing the connection pool.
    pub fn with_token(&self, token: String) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            token: Some(token),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn auth_headers(&self) -> Result<header::HeaderMap, ApiError> {
        let mut headers = header::HeaderMap::new();
        if let Some(ref token) = self.token {
            let value = header::HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| {
                    ApiError::MalformedToken("token contains characters not allowed in a header".to_string())
                })?;
            headers.insert(header::AUTHORIZATION, value);
        }
        Ok(headers)
    }

    /// Check if a response is successful, returning a typed error with the body if not.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self
            .client
            .get(self.url(path))
            .headers(self.auth_headers()?)
            .send()
            .await?;
        let response = Self::check(response).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("unexpected body from {}: {}", path, e)))
    }

    async fn post_unit<B: Serialize>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.url(path))
            .headers(self.auth_headers()?)
            .json(body)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn put_unit<B: Serialize>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let response = self
            .client
            .put(self.url(path))
            .headers(self.auth_headers()?)
            .json(body)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn delete_unit(&self, path: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(self.url(path))
            .headers(self.auth_headers()?)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    // ===== Authentication =====

    /// Exchange credentials for a bearer token. The login endpoint is
    /// form-encoded, unlike the rest of the JSON API.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, ApiError> {
        let response = self
            .client
            .post(self.url("/auth/login"))
            .form(&[("username", username), ("password", password)])
            .send()
            .await?;

        // The collaborator signals a rejected attempt with a 4xx; all of
        // them mean the same thing to the person at the keyboard.
        if matches!(response.status().as_u16(), 400 | 401 | 403 | 422) {
            return Err(ApiError::InvalidCredentials);
        }

        let response = Self::check(response).await?;
        let auth: TokenResponse = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("unexpected login body: {}", e)))?;
        debug!(token_type = %auth.token_type, "login accepted");
        Ok(auth.access_token)
    }

    /// Submit a registration payload and return the issued token.
    pub async fn register<R: Serialize>(&self, payload: &R) -> Result<String, ApiError> {
        let response = self
            .client
            .post(self.url("/auth/register"))
            .json(payload)
            .send()
            .await?;
        let response = Self::check(response).await?;
        let auth: TokenResponse = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("unexpected register body: {}", e)))?;
        Ok(auth.access_token)
    }

    // ===== Directory listings =====

    /// Plain paginated listing, no filter constraints.
    pub async fn list_alumni(
        &self,
        page: u32,
        per_page: u32,
    ) -> Result<PagedResponse<AlumniSummary>, ApiError> {
        self.get_json(&format!("/admin/alumni?page={}&per_page={}", page, per_page))
            .await
    }

    /// Filtered listing. `pairs` must already contain only the active
    /// constraints; this method does not prune empties.
    pub async fn filter_alumni(
        &self,
        pairs: &[(&'static str, String)],
        page: u32,
        per_page: u32,
    ) -> Result<PagedResponse<AlumniSummary>, ApiError> {
        let response = self
            .client
            .get(self.url("/admin/alumni/filter"))
            .headers(self.auth_headers()?)
            .query(pairs)
            .query(&[("page", page.to_string()), ("per_page", per_page.to_string())])
            .send()
            .await?;
        let response = Self::check(response).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("unexpected filter body: {}", e)))
    }

    /// Known departments, companies, and positions for filter inputs.
    pub async fn filter_categories(&self) -> Result<FilterCategories, ApiError> {
        self.get_json("/admin/filter-categories").await
    }

    /// Headline numbers for the admin landing view.
    pub async fn dashboard(&self) -> Result<DashboardData, ApiError> {
        #[derive(Deserialize)]
        struct Wrapper {
            data: DashboardData,
        }
        let wrapper: Wrapper = self.get_json("/admin/dashboard").await?;
        Ok(wrapper.data)
    }

    /// Dashboard and filter categories fetched concurrently; the admin
    /// landing view needs both before it renders.
    pub async fn admin_overview(&self) -> Result<(DashboardData, FilterCategories), ApiError> {
        futures::future::try_join(self.dashboard(), self.filter_categories()).await
    }

    // ===== Own profile =====

    pub async fn get_profile(&self) -> Result<AlumniRecord, ApiError> {
        self.get_json("/alumni/profile").await
    }

    pub async fn update_profile(&self, basics: &AlumniBasics) -> Result<(), ApiError> {
        self.put_unit("/alumni/profile", basics).await
    }

    pub async fn add_education(&self, education: &Education) -> Result<(), ApiError> {
        self.add_entry(EntryKind::Education, education).await
    }

    pub async fn add_employment(&self, employment: &Employment) -> Result<(), ApiError> {
        self.add_entry(EntryKind::Job, employment).await
    }

    pub async fn add_achievement(&self, achievement: &Achievement) -> Result<(), ApiError> {
        self.add_entry(EntryKind::Achievement, achievement).await
    }

    pub async fn delete_education(&self, id: &str) -> Result<(), ApiError> {
        self.delete_entry(EntryKind::Education, id).await
    }

    pub async fn delete_employment(&self, id: &str) -> Result<(), ApiError> {
        self.delete_entry(EntryKind::Job, id).await
    }

    pub async fn delete_achievement(&self, id: &str) -> Result<(), ApiError> {
        self.delete_entry(EntryKind::Achievement, id).await
    }

    async fn add_entry<T: Serialize>(&self, kind: EntryKind, entry: &T) -> Result<(), ApiError> {
        let body = TaggedEntry {
            kind: kind.as_str(),
            entry,
        };
        self.post_unit("/alumni/profile", &body).await
    }

    async fn delete_entry(&self, kind: EntryKind, id: &str) -> Result<(), ApiError> {
        self.delete_unit(&format!("/alumni/profile/{}/{}", kind.as_str(), id))
            .await
    }

    /// Upload a profile image. The pipeline behind this endpoint is the
    /// server's concern; the client only speaks the multipart contract.
    pub async fn upload_profile_image(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<(), ApiError> {
        let part = multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = multipart::Form::new().part("file", part);
        let response = self
            .client
            .post(self.url("/alumni/profile/image"))
            .headers(self.auth_headers()?)
            .multipart(form)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    // ===== Administrator record surface =====

    pub async fn admin_get_alumni(&self, alumni_id: i64) -> Result<AlumniRecord, ApiError> {
        self.get_json(&format!("/admin/alumni/{}", alumni_id)).await
    }

    pub async fn admin_update_alumni(
        &self,
        alumni_id: i64,
        update: &AdminAlumniUpdate,
    ) -> Result<(), ApiError> {
        self.put_unit(&format!("/admin/alumni/{}", alumni_id), update)
            .await
    }

    pub async fn admin_delete_alumni(&self, alumni_id: i64) -> Result<(), ApiError> {
        self.delete_unit(&format!("/admin/alumni/{}", alumni_id)).await
    }

    pub async fn admin_add_education(
        &self,
        alumni_id: i64,
        education: &Education,
    ) -> Result<(), ApiError> {
        self.admin_add_entry(alumni_id, EntryKind::Education, education)
            .await
    }

    pub async fn admin_add_employment(
        &self,
        alumni_id: i64,
        employment: &Employment,
    ) -> Result<(), ApiError> {
        self.admin_add_entry(alumni_id, EntryKind::Job, employment).await
    }

    pub async fn admin_add_achievement(
        &self,
        alumni_id: i64,
        achievement: &Achievement,
    ) -> Result<(), ApiError> {
        self.admin_add_entry(alumni_id, EntryKind::Achievement, achievement)
            .await
    }

    pub async fn admin_delete_education(&self, alumni_id: i64, id: &str) -> Result<(), ApiError> {
        self.admin_delete_entry(alumni_id, EntryKind::Education, id).await
    }

    pub async fn admin_delete_employment(&self, alumni_id: i64, id: &str) -> Result<(), ApiError> {
        self.admin_delete_entry(alumni_id, EntryKind::Job, id).await
    }

    pub async fn admin_delete_achievement(&self, alumni_id: i64, id: &str) -> Result<(), ApiError> {
        self.admin_delete_entry(alumni_id, EntryKind::Achievement, id).await
    }

    async fn admin_add_entry<T: Serialize>(
        &self,
        alumni_id: i64,
        kind: EntryKind,
        entry: &T,
    ) -> Result<(), ApiError> {
        // The admin surface encodes the kind in the path, not a type tag.
        self.post_unit(&format!("/admin/alumni/{}/{}", alumni_id, kind.as_str()), entry)
            .await
    }

    async fn admin_delete_entry(
        &self,
        alumni_id: i64,
        kind: EntryKind,
        id: &str,
    ) -> Result<(), ApiError> {
        self.delete_unit(&format!("/admin/alumni/{}/{}/{}", alumni_id, kind.as_str(), id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tagged_entry_flattens_with_discriminator() {
        let education = Education {
            id: None,
            degree: "BSc".to_string(),
            department: "Physics".to_string(),
            institution: "Our College".to_string(),
            start_year: 2016,
            end_year: 2020,
            cgpa: None,
            achievements: None,
        };
        let body = TaggedEntry {
            kind: EntryKind::Education.as_str(),
            entry: &education,
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["type"], "education");
        assert_eq!(json["degree"], "BSc");
        assert_eq!(json["start_year"], 2016);
    }

    #[tokio::test]
    async fn bearer_token_is_attached_to_gated_requests() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/alumni/profile")
            .match_header("authorization", "Bearer aaa.bbb.ccc")
            .with_status(200)
            .with_body(
                r#"{"id": "1", "full_name": "Alice", "email": "a@example.edu",
                    "education": [], "jobs": [], "achievements": []}"#,
            )
            .create_async()
            .await;

        let client = ApiClient::new(server.url())
            .unwrap()
            .with_token("aaa.bbb.ccc".to_string());
        let record = client.get_profile().await.unwrap();

        mock.assert_async().await;
        assert_eq!(record.full_name, "Alice");
    }

    #[tokio::test]
    async fn rejected_login_maps_to_invalid_credentials() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/auth/login")
            .with_status(401)
            .with_body(r#"{"detail": "Incorrect username or password"}"#)
            .create_async()
            .await;

        let client = ApiClient::new(server.url()).unwrap();
        let err = client.login("alice", "wrong").await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidCredentials));
    }

    #[tokio::test]
    async fn missing_record_maps_to_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/admin/alumni/99")
            .with_status(404)
            .with_body("no such alumnus")
            .create_async()
            .await;

        let client = ApiClient::new(server.url())
            .unwrap()
            .with_token("aaa.bbb.ccc".to_string());
        let err = client.admin_get_alumni(99).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
