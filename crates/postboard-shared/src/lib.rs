//! # Postboard Shared
//!
//! Wire types shared by the server and its clients: the response envelope,
//! request bodies and the post view.

pub mod dto;
pub mod response;

pub use dto::{PostDto, PostModifyRequest, PostWriteRequest};
pub use response::ApiResponse;
