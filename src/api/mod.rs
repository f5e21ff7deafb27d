mod client;
pub mod multipart;
mod request;
mod resources;

pub use client::ApiClient;
pub use multipart::{LineEndings, MultipartForm, Part};
pub use request::{ApiRequest, RequestBody};
pub use resources::{Resource, CONTACT_PART, PHOTO_PART};
