use super::{ApiClient, ApiRequest, MultipartForm, RequestBody};
use crate::{error::Result, http_client::Transport, oauth::AccessToken};
use reqwest::header::HeaderMap;
use serde_json::{Map, Value};
use std::fmt;

/// The part a contact's JSON travels in when sent as multipart.
pub const CONTACT_PART: &str = "contact.json";

/// The part a contact's photo travels in.
pub const PHOTO_PART: &str = "image.jpg";

/// Every CAB API operation we know by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    AccountGet,
    TagsGet,
    TagsCreate,
    TagsUpdate,
    TagsDelete,
    ContactsGet,
    ContactsCreate,
    ContactsUpdate,
    ContactsDelete,
    ContactsScroll,
    ContactsSearch,
    ContactsManageTags,
    ContactsUploadPhoto,
    AbsGet,
}

impl Resource {
    pub const ALL: [Self; 14] = [
        Self::AccountGet,
        Self::TagsGet,
        Self::TagsCreate,
        Self::TagsUpdate,
        Self::TagsDelete,
        Self::ContactsGet,
        Self::ContactsCreate,
        Self::ContactsUpdate,
        Self::ContactsDelete,
        Self::ContactsScroll,
        Self::ContactsSearch,
        Self::ContactsManageTags,
        Self::ContactsUploadPhoto,
        Self::AbsGet,
    ];

    /// The path segment following `/v3/`.
    pub const fn path(self) -> &'static str {
        match self {
            Self::AccountGet => "account.get",
            Self::TagsGet => "tags.get",
            Self::TagsCreate => "tags.create",
            Self::TagsUpdate => "tags.update",
            Self::TagsDelete => "tags.delete",
            Self::ContactsGet => "contacts.get",
            Self::ContactsCreate => "contacts.create",
            Self::ContactsUpdate => "contacts.update",
            Self::ContactsDelete => "contacts.delete",
            Self::ContactsScroll => "contacts.scroll",
            Self::ContactsSearch => "contacts.search",
            Self::ContactsManageTags => "contacts.manageTags",
            Self::ContactsUploadPhoto => "contacts.uploadPhoto",
            Self::AbsGet => "abs.get",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl From<Resource> for String {
    fn from(resource: Resource) -> Self {
        resource.path().to_string()
    }
}

impl<T: Transport> ApiClient<T> {
    async fn json(
        &self,
        resource: Resource,
        token: &AccessToken,
        body: impl Into<RequestBody>,
        headers: HeaderMap,
    ) -> Result<Value> {
        let request = ApiRequest::new(resource)
            .bearer(token)
            .body(body)
            .headers(headers);
        self.call(request).await
    }

    async fn multipart(
        &self,
        resource: Resource,
        token: &AccessToken,
        form: MultipartForm,
        headers: HeaderMap,
    ) -> Result<Value> {
        let request = ApiRequest::new(resource).bearer(token).headers(headers);
        self.call_multipart(request, form).await
    }

    pub async fn account_get(
        &self,
        token: &AccessToken,
        body: impl Into<RequestBody>,
        headers: HeaderMap,
    ) -> Result<Value> {
        self.json(Resource::AccountGet, token, body, headers).await
    }

    pub async fn tags_get(
        &self,
        token: &AccessToken,
        body: impl Into<RequestBody>,
        headers: HeaderMap,
    ) -> Result<Value> {
        self.json(Resource::TagsGet, token, body, headers).await
    }

    pub async fn tags_create(
        &self,
        token: &AccessToken,
        body: impl Into<RequestBody>,
        headers: HeaderMap,
    ) -> Result<Value> {
        self.json(Resource::TagsCreate, token, body, headers).await
    }

    pub async fn tags_update(
        &self,
        token: &AccessToken,
        body: impl Into<RequestBody>,
        headers: HeaderMap,
    ) -> Result<Value> {
        self.json(Resource::TagsUpdate, token, body, headers).await
    }

    pub async fn tags_delete(
        &self,
        token: &AccessToken,
        body: impl Into<RequestBody>,
        headers: HeaderMap,
    ) -> Result<Value> {
        self.json(Resource::TagsDelete, token, body, headers).await
    }

    pub async fn contacts_get(
        &self,
        token: &AccessToken,
        body: impl Into<RequestBody>,
        headers: HeaderMap,
    ) -> Result<Value> {
        self.json(Resource::ContactsGet, token, body, headers).await
    }

    /// Creates a contact.
    ///
    /// When `data` is supplied, the call goes out as multipart with `body`
    /// placed in the `contact.json` part. Otherwise `body` is sent as is,
    /// so a raw string reaches the provider byte-for-byte.
    pub async fn contacts_create(
        &self,
        token: &AccessToken,
        body: Option<RequestBody>,
        data: Option<MultipartForm>,
        headers: HeaderMap,
    ) -> Result<Value> {
        let resource = Resource::ContactsCreate;
        self.contact_write(resource, token, body, data, CONTACT_PART, headers).await
    }

    /// Updates a contact, like [`ApiClient::contacts_create`].
    ///
    /// `body_part` names the part `body` travels in when `data` is supplied;
    /// `None` means `contact.json`.
    pub async fn contacts_update(
        &self,
        token: &AccessToken,
        body: Option<RequestBody>,
        data: Option<MultipartForm>,
        body_part: Option<&str>,
        headers: HeaderMap,
    ) -> Result<Value> {
        let body_part = body_part.unwrap_or(CONTACT_PART);
        let resource = Resource::ContactsUpdate;
        self.contact_write(resource, token, body, data, body_part, headers).await
    }

    async fn contact_write(
        &self,
        resource: Resource,
        token: &AccessToken,
        body: Option<RequestBody>,
        data: Option<MultipartForm>,
        body_part: &str,
        headers: HeaderMap,
    ) -> Result<Value> {
        let Some(form) = data else {
            let body = body.unwrap_or(RequestBody::Json(Value::Null));
            return self.json(resource, token, body, headers).await;
        };

        // A raw body is taken to be JSON text already.
        let form = match body {
            Some(RequestBody::Json(value)) => form.json(body_part, value),
            Some(RequestBody::Raw(bytes)) => {
                form.bytes_with_type(body_part, bytes, "application/json")
            }
            None => form,
        };
        self.multipart(resource, token, form, headers).await
    }

    pub async fn contacts_delete(
        &self,
        token: &AccessToken,
        body: impl Into<RequestBody>,
        headers: HeaderMap,
    ) -> Result<Value> {
        self.json(Resource::ContactsDelete, token, body, headers).await
    }

    pub async fn contacts_scroll(
        &self,
        token: &AccessToken,
        body: impl Into<RequestBody>,
        headers: HeaderMap,
    ) -> Result<Value> {
        self.json(Resource::ContactsScroll, token, body, headers).await
    }

    pub async fn contacts_search(
        &self,
        token: &AccessToken,
        body: impl Into<RequestBody>,
        headers: HeaderMap,
    ) -> Result<Value> {
        self.json(Resource::ContactsSearch, token, body, headers).await
    }

    pub async fn contacts_manage_tags(
        &self,
        token: &AccessToken,
        body: impl Into<RequestBody>,
        headers: HeaderMap,
    ) -> Result<Value> {
        self.json(Resource::ContactsManageTags, token, body, headers).await
    }

    /// Uploads a JPEG photo for the contact described by `contact`.
    pub async fn contacts_upload_photo(
        &self,
        token: &AccessToken,
        contact: Value,
        image: impl Into<Vec<u8>>,
        headers: HeaderMap,
    ) -> Result<Value> {
        let form = MultipartForm::new()
            .json(CONTACT_PART, contact)
            .bytes(PHOTO_PART, image);
        self.multipart(Resource::ContactsUploadPhoto, token, form, headers).await
    }

    pub async fn abs_get(
        &self,
        token: &AccessToken,
        body: impl Into<RequestBody>,
        headers: HeaderMap,
    ) -> Result<Value> {
        self.json(Resource::AbsGet, token, body, headers).await
    }

    /// Pages through `contacts.scroll`, fetching at most `max_pages` pages.
    ///
    /// Each response's `cursor` is sent back as `scrollCursor` on the next
    /// request. Paging stops early once a response has no cursor.
    pub async fn scroll_contacts(
        &self,
        token: &AccessToken,
        mut payload: Map<String, Value>,
        max_pages: usize,
    ) -> Result<Vec<Value>> {
        let mut pages = Vec::new();
        while pages.len() < max_pages {
            let body = Value::Object(payload.clone());
            let page = self.contacts_scroll(token, body, HeaderMap::new()).await?;

            let cursor = page
                .get("cursor")
                .and_then(Value::as_str)
                .filter(|cursor| !cursor.is_empty())
                .map(str::to_string);
            pages.push(page);

            let Some(cursor) = cursor else {
                break;
            };
            payload.insert("scrollCursor".to_string(), Value::String(cursor));
        }
        Ok(pages)
    }
}
