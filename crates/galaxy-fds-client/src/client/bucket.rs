//! Bucket-level operations: lifecycle, ACL, quota, listings, and domain
//! mappings.

use galaxy_fds_auth::SubResource;
use http::{HeaderMap, Method, StatusCode};

use super::{GalaxyFdsClient, TRASH_BUCKET_NAME};
use crate::error::{FdsError, FdsResult};
use crate::uri::format_uri;
use galaxy_fds_model::{
    AccessControlPolicy, ListAllBucketsResult, ListDomainMappingsResult, ListObjectsResult,
    QuotaPolicy,
};

impl GalaxyFdsClient {
    /// List all buckets owned by the caller.
    pub async fn list_buckets(&self) -> FdsResult<ListAllBucketsResult> {
        let uri = format_uri(&self.base_uri(), "", &[])?;
        let response = self
            .execute("list buckets", Method::GET, &uri, &[], None, &HeaderMap::new(), None)
            .await?;
        Ok(response.json().await?)
    }

    /// Create a bucket.
    pub async fn create_bucket(&self, bucket: &str) -> FdsResult<()> {
        let uri = format_uri(&self.base_uri(), bucket, &[])?;
        self.execute(
            "create bucket",
            Method::PUT,
            &uri,
            &[],
            Some(mime::APPLICATION_JSON.as_ref()),
            &HeaderMap::new(),
            None,
        )
        .await?;
        Ok(())
    }

    /// Delete a bucket. The bucket must be empty.
    pub async fn delete_bucket(&self, bucket: &str) -> FdsResult<()> {
        let uri = format_uri(&self.base_uri(), bucket, &[])?;
        self.execute(
            "delete bucket",
            Method::DELETE,
            &uri,
            &[],
            None,
            &HeaderMap::new(),
            None,
        )
        .await?;
        Ok(())
    }

    /// Verify that a bucket exists and is readable by the caller.
    pub async fn get_bucket(&self, bucket: &str) -> FdsResult<()> {
        let uri = format_uri(&self.base_uri(), bucket, &[])?;
        self.execute(
            "get bucket",
            Method::GET,
            &uri,
            &[],
            None,
            &HeaderMap::new(),
            None,
        )
        .await?;
        Ok(())
    }

    /// Whether a bucket exists and is visible to the caller.
    pub async fn does_bucket_exist(&self, bucket: &str) -> FdsResult<bool> {
        let uri = format_uri(&self.base_uri(), bucket, &[])?;
        let response = self
            .send(Method::HEAD, &uri, &[], None, &HeaderMap::new(), None)
            .await?;
        match response.status() {
            StatusCode::OK => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => Err(FdsError::ServerError {
                operation: "head bucket",
                status: status.as_u16(),
                reason: response.text().await.unwrap_or_default(),
            }),
        }
    }

    /// Fetch the access control policy of a bucket.
    pub async fn get_bucket_acl(&self, bucket: &str) -> FdsResult<AccessControlPolicy> {
        let uri = format_uri(&self.base_uri(), bucket, &[SubResource::Acl])?;
        let response = self
            .execute(
                "get bucket acl",
                Method::GET,
                &uri,
                &[],
                None,
                &HeaderMap::new(),
                None,
            )
            .await?;
        Ok(response.json().await?)
    }

    /// Replace the access control policy of a bucket.
    pub async fn set_bucket_acl(
        &self,
        bucket: &str,
        policy: &AccessControlPolicy,
    ) -> FdsResult<()> {
        let uri = format_uri(&self.base_uri(), bucket, &[SubResource::Acl])?;
        let body = serde_json::to_vec(policy)?;
        self.execute(
            "set bucket acl",
            Method::PUT,
            &uri,
            &[],
            Some(mime::APPLICATION_JSON.as_ref()),
            &HeaderMap::new(),
            Some(body.into()),
        )
        .await?;
        Ok(())
    }

    /// Fetch the quota policy of a bucket.
    pub async fn get_bucket_quota(&self, bucket: &str) -> FdsResult<QuotaPolicy> {
        let uri = format_uri(&self.base_uri(), bucket, &[SubResource::Quota])?;
        let response = self
            .execute(
                "get bucket quota",
                Method::GET,
                &uri,
                &[],
                None,
                &HeaderMap::new(),
                None,
            )
            .await?;
        Ok(response.json().await?)
    }

    /// Replace the quota policy of a bucket.
    pub async fn set_bucket_quota(&self, bucket: &str, quota: &QuotaPolicy) -> FdsResult<()> {
        let uri = format_uri(&self.base_uri(), bucket, &[SubResource::Quota])?;
        let body = serde_json::to_vec(quota)?;
        self.execute(
            "set bucket quota",
            Method::PUT,
            &uri,
            &[],
            Some(mime::APPLICATION_JSON.as_ref()),
            &HeaderMap::new(),
            Some(body.into()),
        )
        .await?;
        Ok(())
    }

    /// List objects under `prefix`, rolling up names at `delimiter`.
    pub async fn list_objects(
        &self,
        bucket: &str,
        prefix: &str,
        delimiter: &str,
    ) -> FdsResult<ListObjectsResult> {
        let uri = format_uri(&self.base_uri(), bucket, &[])?;
        let response = self
            .execute(
                "list objects",
                Method::GET,
                &uri,
                &[("prefix", prefix), ("delimiter", delimiter)],
                None,
                &HeaderMap::new(),
                None,
            )
            .await?;
        Ok(response.json().await?)
    }

    /// List deleted objects awaiting restore in the trash bucket.
    pub async fn list_trash_objects(
        &self,
        prefix: &str,
        delimiter: &str,
    ) -> FdsResult<ListObjectsResult> {
        self.list_objects(TRASH_BUCKET_NAME, prefix, delimiter).await
    }

    /// Fetch the page after `previous`, or `None` when the listing was
    /// already complete.
    pub async fn list_next_batch(
        &self,
        previous: &ListObjectsResult,
    ) -> FdsResult<Option<ListObjectsResult>> {
        if !previous.truncated {
            return Ok(None);
        }
        let params = next_batch_query(previous);
        let query: Vec<(&str, &str)> = params.iter().map(|(k, v)| (*k, v.as_str())).collect();

        let uri = format_uri(&self.base_uri(), &previous.name, &[])?;
        let response = self
            .execute(
                "list objects",
                Method::GET,
                &uri,
                &query,
                None,
                &HeaderMap::new(),
                None,
            )
            .await?;
        Ok(Some(response.json().await?))
    }

    /// Map a custom domain name to a bucket.
    pub async fn put_domain_mapping(&self, bucket: &str, domain_name: &str) -> FdsResult<()> {
        let uri = format_uri(&self.base_uri(), bucket, &[])?;
        self.execute(
            "put domain mapping",
            Method::PUT,
            &uri,
            &[("domain", domain_name)],
            Some(mime::APPLICATION_JSON.as_ref()),
            &HeaderMap::new(),
            None,
        )
        .await?;
        Ok(())
    }

    /// List the custom domain names mapped to a bucket.
    pub async fn list_domain_mappings(&self, bucket: &str) -> FdsResult<Vec<String>> {
        let uri = format_uri(&self.base_uri(), bucket, &[])?;
        let response = self
            .execute(
                "list domain mappings",
                Method::GET,
                &uri,
                &[("domain", "")],
                None,
                &HeaderMap::new(),
                None,
            )
            .await?;
        let result: ListDomainMappingsResult = response.json().await?;
        Ok(result.domain_mappings)
    }

    /// Remove a custom domain name mapping from a bucket.
    pub async fn delete_domain_mapping(&self, bucket: &str, domain_name: &str) -> FdsResult<()> {
        let uri = format_uri(&self.base_uri(), bucket, &[])?;
        self.execute(
            "delete domain mapping",
            Method::DELETE,
            &uri,
            &[("domain", domain_name)],
            None,
            &HeaderMap::new(),
            None,
        )
        .await?;
        Ok(())
    }
}

/// Query parameters for the follow-up page of a truncated listing. The page
/// size from the previous page is carried forward so it does not reset to the
/// server default.
fn next_batch_query(previous: &ListObjectsResult) -> [(&'static str, String); 4] {
    [
        ("prefix", previous.prefix.clone()),
        (
            "delimiter",
            previous.delimiter.clone().unwrap_or_default(),
        ),
        ("marker", previous.next_marker.clone().unwrap_or_default()),
        ("maxKeys", previous.max_keys.to_string()),
    ]
}
