pub mod dto;

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::AppError;
use crate::models::{CoursePayload, TrackedCourse};

/// The remote tracked-courses API. Every call is scoped to an owner id;
/// ownership checks are the backend's job.
#[async_trait]
pub trait CourseGateway: Send + Sync {
    async fn list_courses(&self, user_id: &str) -> Result<Vec<TrackedCourse>, AppError>;
    async fn get_course(&self, id: &str, user_id: &str) -> Result<TrackedCourse, AppError>;
    async fn add_course(&self, payload: &CoursePayload) -> Result<Option<String>, AppError>;
    async fn update_course(
        &self,
        id: &str,
        payload: &CoursePayload,
    ) -> Result<Option<String>, AppError>;
    async fn delete_course(&self, id: &str, user_id: &str) -> Result<Option<String>, AppError>;
}

pub struct HttpCourseGateway {
    client: Client,
    base_url: Url,
}

impl HttpCourseGateway {
    pub fn new(config: &ClientConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build http client: {}", e)))?;
        Ok(Self {
            client,
            base_url: config.backend_url.clone(),
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, AppError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                AppError::Config(format!("BACKEND_URL cannot be a base: {}", self.base_url))
            })?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    fn owner_scoped(&self, segments: &[&str], user_id: &str) -> Result<Url, AppError> {
        let mut url = self.endpoint(segments)?;
        url.query_pairs_mut().append_pair("userId", user_id);
        Ok(url)
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
        let body = Self::read_body(response).await?;
        serde_json::from_str(&body).map_err(|e| AppError::Decode(e.to_string()))
    }

    async fn read_message(response: Response) -> Result<Option<String>, AppError> {
        let body = Self::read_body(response).await?;
        Ok(serde_json::from_str::<dto::MessageResponse>(&body)
            .ok()
            .and_then(|r| r.message))
    }

    async fn read_body(response: Response) -> Result<String, AppError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<dto::ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message);
            return Err(AppError::Gateway {
                status: status.as_u16(),
                message,
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl CourseGateway for HttpCourseGateway {
    async fn list_courses(&self, user_id: &str) -> Result<Vec<TrackedCourse>, AppError> {
        // trailing slash is part of the collection route
        let url = self.owner_scoped(&["tracked-courses", ""], user_id)?;
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        Self::read_json(response).await
    }

    async fn get_course(&self, id: &str, user_id: &str) -> Result<TrackedCourse, AppError> {
        let url = self.owner_scoped(&["tracked-courses", id], user_id)?;
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        Self::read_json(response).await
    }

    async fn add_course(&self, payload: &CoursePayload) -> Result<Option<String>, AppError> {
        let url = self.endpoint(&["tracked-courses", "add"])?;
        debug!("POST {}", url);
        let response = self.client.post(url).json(payload).send().await?;
        Self::read_message(response).await
    }

    async fn update_course(
        &self,
        id: &str,
        payload: &CoursePayload,
    ) -> Result<Option<String>, AppError> {
        let url = self.endpoint(&["tracked-courses", "update", id])?;
        debug!("POST {}", url);
        let response = self.client.post(url).json(payload).send().await?;
        Self::read_message(response).await
    }

    async fn delete_course(&self, id: &str, user_id: &str) -> Result<Option<String>, AppError> {
        let url = self.endpoint(&["tracked-courses", id])?;
        debug!("DELETE {}", url);
        let response = self
            .client
            .delete(url)
            .json(&dto::DeleteRequest { user_id })
            .send()
            .await?;
        Self::read_message(response).await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn gateway(base: &str) -> HttpCourseGateway {
        let config = ClientConfig {
            backend_url: Url::parse(base).unwrap(),
            user_id: None,
            redirect_delay: Duration::from_millis(0),
            request_timeout: Duration::from_secs(1),
        };
        HttpCourseGateway::new(&config).unwrap()
    }

    #[test]
    fn collection_url_keeps_trailing_slash_and_owner_query() {
        let gw = gateway("http://localhost:5000");
        let url = gw.owner_scoped(&["tracked-courses", ""], "u 1").unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/tracked-courses/?userId=u+1");
    }

    #[test]
    fn base_path_is_preserved() {
        let gw = gateway("http://localhost:5000/api/");
        let url = gw.endpoint(&["tracked-courses", "update", "abc"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/tracked-courses/update/abc");
    }

    #[test]
    fn ids_are_escaped_as_single_segment() {
        let gw = gateway("http://localhost:5000");
        let url = gw.endpoint(&["tracked-courses", "a/b"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/tracked-courses/a%2Fb");
    }
}
