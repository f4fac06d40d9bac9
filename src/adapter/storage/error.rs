//! Storage Errors
//!
//! オブジェクトストアアダプターのエラー

use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::operation::put_object::PutObjectError;
use aws_sdk_s3::primitives::ByteStreamError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to read local file {path}")]
    ReadFile {
        path: String,
        #[source]
        source: ByteStreamError,
    },
    #[error("Failed to put object: {0}")]
    UnableToPutObject(#[from] SdkError<PutObjectError>),
}
