//! Fixed endpoint templates of the contacts backend.

/// One of the backend's endpoints, parameterized by contact id where the
/// route needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint<'a> {
    ListContacts { limit: u32 },
    ContactInfo(&'a str),
    UpdateZip(&'a str),
    UpdateCity(&'a str),
    /// Declared by the backend; no client operation calls it.
    Geocode,
}

impl Endpoint<'_> {
    /// Path relative to the base address, including any query string.
    pub fn path(&self) -> String {
        match self {
            Endpoint::ListContacts { limit } => format!("/list-contacts?limit={limit}"),
            Endpoint::ContactInfo(id) => format!("/contact-info/{id}"),
            Endpoint::UpdateZip(id) => format!("/update-zip/{id}"),
            Endpoint::UpdateCity(id) => format!("/update-city/{id}"),
            Endpoint::Geocode => "/geocode".to_string(),
        }
    }
}
