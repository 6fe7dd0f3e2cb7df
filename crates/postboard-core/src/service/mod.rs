//! Application services - business logic orchestrating the ports.

mod post;

pub use post::PostService;
