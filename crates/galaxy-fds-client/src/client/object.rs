//! Object-level operations: reads, writes, metadata, ACL, and lifecycle
//! commands.

use bytes::Bytes;
use galaxy_fds_auth::SubResource;
use http::{HeaderMap, HeaderValue, Method, StatusCode, header};

use super::GalaxyFdsClient;
use crate::error::{FdsError, FdsResult};
use crate::uri::format_uri;
use galaxy_fds_model::{
    AccessControlPolicy, FdsObject, ObjectMetadata, PutObjectResult,
};

impl GalaxyFdsClient {
    /// Write an object under an explicit name.
    ///
    /// The content type comes from `metadata` when present, defaulting to
    /// `application/octet-stream`.
    pub async fn put_object(
        &self,
        bucket: &str,
        object: &str,
        content: Bytes,
        metadata: &ObjectMetadata,
    ) -> FdsResult<PutObjectResult> {
        let uri = format_uri(&self.upload_base_uri(), &format!("{bucket}/{object}"), &[])?;
        let media_type = metadata
            .get("content-type")
            .unwrap_or(mime::APPLICATION_OCTET_STREAM.as_ref())
            .to_owned();
        let response = self
            .execute(
                "put object",
                Method::PUT,
                &uri,
                &[],
                Some(&media_type),
                &metadata.to_header_map()?,
                Some(content),
            )
            .await?;
        Ok(response.json().await?)
    }

    /// Write an object under a server-assigned name, returned in the result.
    pub async fn post_object(
        &self,
        bucket: &str,
        content: Bytes,
        metadata: &ObjectMetadata,
    ) -> FdsResult<PutObjectResult> {
        let uri = format_uri(&self.upload_base_uri(), &format!("{bucket}/"), &[])?;
        let media_type = metadata
            .get("content-type")
            .unwrap_or(mime::APPLICATION_OCTET_STREAM.as_ref())
            .to_owned();
        let response = self
            .execute(
                "post object",
                Method::POST,
                &uri,
                &[],
                Some(&media_type),
                &metadata.to_header_map()?,
                Some(content),
            )
            .await?;
        Ok(response.json().await?)
    }

    /// Read an object's content and metadata from the start.
    pub async fn get_object(&self, bucket: &str, object: &str) -> FdsResult<FdsObject> {
        self.get_object_starting_at(bucket, object, 0).await
    }

    /// Read an object from byte offset `pos` onward.
    ///
    /// Goes through the download endpoint, so the CDN-for-download toggle
    /// applies. A `pos` of zero reads the whole object; otherwise a `Range`
    /// header is sent and the server may answer 200 or 206.
    pub async fn get_object_starting_at(
        &self,
        bucket: &str,
        object: &str,
        pos: u64,
    ) -> FdsResult<FdsObject> {
        let uri = self.generate_download_object_uri(bucket, object)?;

        let mut headers = HeaderMap::new();
        if pos > 0 {
            let range = HeaderValue::from_str(&format!("bytes={pos}-"))
                .map_err(|e| FdsError::InvalidHeader(e.to_string()))?;
            headers.insert(header::RANGE, range);
        }

        let response = self
            .send(Method::GET, &uri, &[], None, &headers, None)
            .await?;
        match response.status() {
            StatusCode::OK | StatusCode::PARTIAL_CONTENT => {
                let metadata = ObjectMetadata::from_header_map(response.headers());
                let content = response.bytes().await?;
                Ok(FdsObject {
                    bucket_name: bucket.to_owned(),
                    object_name: object.to_owned(),
                    metadata,
                    content,
                })
            }
            status => Err(FdsError::ServerError {
                operation: "get object",
                status: status.as_u16(),
                reason: response.text().await.unwrap_or_default(),
            }),
        }
    }

    /// Read an object's metadata without its content.
    pub async fn get_object_metadata(
        &self,
        bucket: &str,
        object: &str,
    ) -> FdsResult<ObjectMetadata> {
        let uri = format_uri(
            &self.base_uri(),
            &format!("{bucket}/{object}"),
            &[SubResource::Metadata],
        )?;
        let response = self
            .execute(
                "get object metadata",
                Method::GET,
                &uri,
                &[],
                None,
                &HeaderMap::new(),
                None,
            )
            .await?;
        Ok(ObjectMetadata::from_header_map(response.headers()))
    }

    /// Fetch the access control policy of an object.
    pub async fn get_object_acl(
        &self,
        bucket: &str,
        object: &str,
    ) -> FdsResult<AccessControlPolicy> {
        let uri = format_uri(
            &self.base_uri(),
            &format!("{bucket}/{object}"),
            &[SubResource::Acl],
        )?;
        let response = self
            .execute(
                "get object acl",
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

    /// Replace the access control policy of an object.
    pub async fn set_object_acl(
        &self,
        bucket: &str,
        object: &str,
        policy: &AccessControlPolicy,
    ) -> FdsResult<()> {
        let uri = format_uri(
            &self.base_uri(),
            &format!("{bucket}/{object}"),
            &[SubResource::Acl],
        )?;
        let body = serde_json::to_vec(policy)?;
        self.execute(
            "set object acl",
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

    /// Whether an object exists in the bucket.
    pub async fn does_object_exist(&self, bucket: &str, object: &str) -> FdsResult<bool> {
        let uri = format_uri(&self.base_uri(), &format!("{bucket}/{object}"), &[])?;
        let response = self
            .send(Method::HEAD, &uri, &[], None, &HeaderMap::new(), None)
            .await?;
        match response.status() {
            StatusCode::OK => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => Err(FdsError::ServerError {
                operation: "head object",
                status: status.as_u16(),
                reason: response.text().await.unwrap_or_default(),
            }),
        }
    }

    /// Delete an object.
    pub async fn delete_object(&self, bucket: &str, object: &str) -> FdsResult<()> {
        let uri = format_uri(&self.base_uri(), &format!("{bucket}/{object}"), &[])?;
        self.execute(
            "delete object",
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

    /// Restore a deleted object from the trash bucket back to its original
    /// location.
    pub async fn restore_object(&self, bucket: &str, object: &str) -> FdsResult<()> {
        let uri = format_uri(&self.base_uri(), &format!("{bucket}/{object}"), &[])?;
        self.execute(
            "restore object",
            Method::PUT,
            &uri,
            &[("restore", "")],
            Some(mime::APPLICATION_JSON.as_ref()),
            &HeaderMap::new(),
            None,
        )
        .await?;
        Ok(())
    }

    /// Rename an object within its bucket.
    pub async fn rename_object(
        &self,
        bucket: &str,
        src_object: &str,
        dst_object: &str,
    ) -> FdsResult<()> {
        let uri = format_uri(&self.base_uri(), &format!("{bucket}/{src_object}"), &[])?;
        self.execute(
            "rename object",
            Method::PUT,
            &uri,
            &[("renameTo", dst_object)],
            Some(mime::APPLICATION_JSON.as_ref()),
            &HeaderMap::new(),
            None,
        )
        .await?;
        Ok(())
    }

    /// Ask the service to push an object out to the CDN edge.
    pub async fn prefetch_object(&self, bucket: &str, object: &str) -> FdsResult<()> {
        let uri = format_uri(&self.base_uri(), &format!("{bucket}/{object}"), &[])?;
        self.execute(
            "prefetch object",
            Method::PUT,
            &uri,
            &[("prefetch", "")],
            Some(mime::APPLICATION_JSON.as_ref()),
            &HeaderMap::new(),
            None,
        )
        .await?;
        Ok(())
    }

    /// Ask the service to invalidate the CDN cache for an object.
    pub async fn refresh_object(&self, bucket: &str, object: &str) -> FdsResult<()> {
        let uri = format_uri(&self.base_uri(), &format!("{bucket}/{object}"), &[])?;
        self.execute(
            "refresh object",
            Method::PUT,
            &uri,
            &[("refresh", "")],
            Some(mime::APPLICATION_JSON.as_ref()),
            &HeaderMap::new(),
            None,
        )
        .await?;
        Ok(())
    }

    /// Make an object publicly readable and prefetch it to the CDN.
    pub async fn set_public(&self, bucket: &str, object: &str) -> FdsResult<()> {
        self.set_public_with_options(bucket, object, false).await
    }

    /// Make an object publicly readable, optionally skipping the CDN
    /// prefetch.
    pub async fn set_public_with_options(
        &self,
        bucket: &str,
        object: &str,
        disable_prefetch: bool,
    ) -> FdsResult<()> {
        self.set_object_acl(bucket, object, &AccessControlPolicy::public_read())
            .await?;
        if !disable_prefetch {
            self.prefetch_object(bucket, object).await?;
        }
        Ok(())
    }
}
