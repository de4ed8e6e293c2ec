//! Resource endpoints — files, links, and the profile projection.

use reqwest::multipart::{Form, Part};
use studyhub_core::{DownloadUrl, NewLink, Resource, UserResource};
use uuid::Uuid;

use crate::{error::Result, gateway::Gateway};

impl Gateway {
  /// `GET /api/v1/resources/weeks/{weekId}`
  pub async fn week_resources(&self, week_id: Uuid) -> Result<Vec<Resource>> {
    self.get(&format!("/resources/weeks/{week_id}")).await
  }

  /// `POST /api/v1/resources/file/{weekId}` — multipart upload.
  pub async fn upload_file(
    &self,
    week_id: Uuid,
    file_name: &str,
    bytes: Vec<u8>,
  ) -> Result<()> {
    let part = Part::bytes(bytes).file_name(file_name.to_owned());
    let form = Form::new().part("file", part);
    self
      .post_multipart::<serde_json::Value>(
        &format!("/resources/file/{week_id}"),
        form,
      )
      .await
      .map(drop)
  }

  /// `POST /api/v1/resources/link/{weekId}`
  pub async fn add_link(&self, week_id: Uuid, link: &NewLink) -> Result<()> {
    self
      .post::<serde_json::Value, _>(&format!("/resources/link/{week_id}"), link)
      .await
      .map(drop)
  }

  /// `GET /api/v1/resources/{objectId}` — presigned download URL for a file.
  pub async fn download_url(&self, object_id: Uuid) -> Result<DownloadUrl> {
    self.get(&format!("/resources/{object_id}")).await
  }

  /// `GET /api/v1/resources/users/{userId}` — profile projection.
  pub async fn user_resources(&self, user_id: Uuid) -> Result<Vec<UserResource>> {
    self.get(&format!("/resources/users/{user_id}")).await
  }

  /// `DELETE /api/v1/resources/{resourceId}`
  pub async fn delete_resource(&self, id: Uuid) -> Result<()> {
    self.delete(&format!("/resources/{id}")).await
  }
}
