pub mod codec_error;
pub mod storage_error;
