#[cfg(test)]
#[path = "courses_test.rs"]
mod tests;

use async_trait::async_trait;
use reqwest::Method;

use super::ApiClient;
use crate::domain::models::Course;
use crate::domain::models::CourseBackend;
use crate::domain::models::CourseInput;
use crate::domain::models::GradPathError;
use crate::domain::models::MessageContent;
use crate::domain::models::RecommendationReply;

#[async_trait]
impl CourseBackend for ApiClient {
    #[allow(clippy::implicit_return)]
    async fn list_courses(&self) -> Result<Vec<Course>, GradPathError> {
        return self
            .send_json(self.request(Method::GET, "/courses/me"))
            .await;
    }

    #[allow(clippy::implicit_return)]
    async fn add_course(&self, input: &CourseInput) -> Result<Course, GradPathError> {
        return self
            .send_json(self.request(Method::POST, "/courses").json(input))
            .await;
    }

    #[allow(clippy::implicit_return)]
    async fn update_course(&self, id: i64, input: &CourseInput) -> Result<Course, GradPathError> {
        return self
            .send_json(
                self.request(Method::PUT, &format!("/courses/{id}"))
                    .json(input),
            )
            .await;
    }

    #[allow(clippy::implicit_return)]
    async fn remove_course(&self, id: i64) -> Result<(), GradPathError> {
        return self
            .send_empty(self.request(Method::DELETE, &format!("/courses/{id}")))
            .await;
    }

    #[allow(clippy::implicit_return)]
    async fn recommendations(&self) -> Result<MessageContent, GradPathError> {
        let res: RecommendationReply = self
            .send_json(self.request(Method::GET, "/recommend/me"))
            .await?;

        return Ok(MessageContent::from_value(res.recommendations));
    }
}
