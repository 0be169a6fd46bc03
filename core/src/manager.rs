//! Caller-side view state over `ContactService`.
//!
//! `ContactManager` holds the loaded list and the selected contact, and
//! enforces the re-fetch rule: after a location update that reached the
//! server, the list and the selection are reloaded from the server instead
//! of being patched locally.

use tracing::{debug, warn};

use crate::error::ApiError;
use crate::http::Transport;
use crate::service::ContactService;
use crate::types::Contact;
use crate::update::LocationUpdate;

/// Number of contacts loaded by `refresh` unless overridden.
pub const MANAGER_LIST_LIMIT: u32 = 50;

#[derive(Debug)]
pub struct ContactManager<T> {
    service: ContactService<T>,
    contacts: Vec<Contact>,
    selected: Option<Contact>,
    list_limit: u32,
    stale: bool,
}

impl<T: Transport> ContactManager<T> {
    pub fn new(service: ContactService<T>) -> Self {
        Self {
            service,
            contacts: Vec::new(),
            selected: None,
            list_limit: MANAGER_LIST_LIMIT,
            stale: false,
        }
    }

    pub fn with_list_limit(mut self, limit: u32) -> Self {
        self.list_limit = limit;
        self
    }

    pub fn service(&self) -> &ContactService<T> {
        &self.service
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn selected(&self) -> Option<&Contact> {
        self.selected.as_ref()
    }

    /// True when a re-fetch after an update failed; the held data may not
    /// match the server.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Seed value for a ZIP edit field: the selection's stored ZIP.
    pub fn draft_zip(&self) -> String {
        self.selected
            .as_ref()
            .and_then(|c| c.properties.zip.clone())
            .unwrap_or_default()
    }

    pub async fn refresh(&mut self) -> Result<&[Contact], ApiError> {
        self.contacts = self.service.get_all_contacts(self.list_limit).await?;
        self.stale = false;
        debug!(count = self.contacts.len(), "contacts loaded");
        Ok(&self.contacts)
    }

    /// Load one contact and make it the selection. On failure the previous
    /// selection is kept.
    pub async fn select(&mut self, contact_id: &str) -> Result<&Contact, ApiError> {
        let contact = self.service.get_contact_by_id(contact_id).await?;
        Ok(&*self.selected.insert(contact))
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Run the ZIP-then-city update and reload whatever it touched.
    ///
    /// Validation failures return before any request and skip the reload.
    /// Every other outcome, errors included, is followed by a reload; a
    /// reload failure is logged and marks the manager stale, and the
    /// update's own result is still returned.
    pub async fn update_zip_and_city(
        &mut self,
        contact_id: &str,
        zip: &str,
    ) -> Result<LocationUpdate, ApiError> {
        let outcome = self.service.update_location(contact_id, zip).await;
        if matches!(outcome, Err(ApiError::Validation(_))) {
            return outcome;
        }

        self.reload_after_update(contact_id).await;
        outcome
    }

    async fn reload_after_update(&mut self, contact_id: &str) {
        if let Err(e) = self.refresh().await.map(|_| ()) {
            warn!(error = %e, "could not reload contacts after update");
            self.stale = true;
        }

        let is_selected = self.selected.as_ref().is_some_and(|c| c.id == contact_id);
        if is_selected {
            if let Err(e) = self.select(contact_id).await.map(|_| ()) {
                warn!(contact_id, error = %e, "could not reload selected contact after update");
                self.stale = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::gateway::RequestGateway;
    use crate::testing::{contact_json, ScriptedTransport};

    const BASE: &str = "http://crm.test";

    fn manager() -> ContactManager<ScriptedTransport> {
        ContactManager::new(ContactService::new(RequestGateway::new(
            BASE,
            ScriptedTransport::default(),
        )))
    }

    fn transport(m: &ContactManager<ScriptedTransport>) -> &ScriptedTransport {
        m.service().gateway().transport()
    }

    fn list_of(zip: Option<&str>, city: Option<&str>) -> serde_json::Value {
        json!({"results": [contact_json("5", Some("Ann"), Some("Lee"), zip, city)]})
    }

    fn info_of(zip: Option<&str>, city: Option<&str>) -> serde_json::Value {
        json!({"success": true, "contact": contact_json("5", Some("Ann"), Some("Lee"), zip, city)})
    }

    #[tokio::test]
    async fn refresh_uses_manager_limit() {
        let mut m = manager();
        transport(&m).push_json(200, list_of(None, None));
        assert_eq!(m.refresh().await.unwrap().len(), 1);
        assert_eq!(transport(&m).paths(), [format!("{BASE}/list-contacts?limit=50")]);
    }

    #[tokio::test]
    async fn select_seeds_draft_zip() {
        let mut m = manager();
        assert_eq!(m.draft_zip(), "");
        transport(&m).push_json(200, info_of(Some("10001"), None));
        m.select("5").await.unwrap();
        assert_eq!(m.draft_zip(), "10001");
    }

    #[tokio::test]
    async fn failed_select_keeps_previous_selection() {
        let mut m = manager();
        transport(&m).push_json(200, info_of(Some("10001"), None));
        m.select("5").await.unwrap();
        transport(&m).push_json(404, json!({"error": "Contact 6 not found"}));
        assert!(m.select("6").await.is_err());
        assert_eq!(m.selected().map(|c| c.id.as_str()), Some("5"));
    }

    #[tokio::test]
    async fn update_reloads_list_and_selection() {
        let mut m = manager();
        transport(&m).push_json(200, info_of(None, None));
        m.select("5").await.unwrap();

        transport(&m).push_json(
            200,
            json!({"success": true, "message": "ok", "contact": contact_json("5", None, None, Some("10001"), None)}),
        );
        transport(&m).push_json(
            200,
            json!({"success": true, "contactId": "5", "zip": "10001", "city": "New York", "message": "ok"}),
        );
        transport(&m).push_json(200, list_of(Some("10001"), Some("New York")));
        transport(&m).push_json(200, info_of(Some("10001"), Some("New York")));

        let outcome = m.update_zip_and_city("5", "10001").await.unwrap();
        assert!(matches!(outcome, LocationUpdate::Updated { .. }));
        assert!(!m.is_stale());
        assert_eq!(m.contacts()[0].properties.city.as_deref(), Some("New York"));
        assert_eq!(m.selected().unwrap().properties.city.as_deref(), Some("New York"));
        assert_eq!(
            transport(&m).paths(),
            [
                format!("{BASE}/contact-info/5"),
                format!("{BASE}/update-zip/5"),
                format!("{BASE}/update-city/5"),
                format!("{BASE}/list-contacts?limit=50"),
                format!("{BASE}/contact-info/5"),
            ]
        );
    }

    #[tokio::test]
    async fn custom_list_limit_is_requested() {
        let mut m = manager().with_list_limit(7);
        transport(&m).push_json(200, list_of(None, None));
        m.refresh().await.unwrap();
        assert_eq!(transport(&m).paths(), [format!("{BASE}/list-contacts?limit=7")]);
    }

    #[tokio::test]
    async fn clear_selection_drops_draft() {
        let mut m = manager();
        transport(&m).push_json(200, info_of(Some("10001"), None));
        m.select("5").await.unwrap();
        m.clear_selection();
        assert!(m.selected().is_none());
        assert_eq!(m.draft_zip(), "");
    }

    #[tokio::test]
    async fn update_of_other_contact_keeps_selection_without_refetch() {
        let mut m = manager();
        transport(&m).push_json(
            200,
            json!({"success": true, "contact": contact_json("6", Some("Bo"), None, Some("60601"), None)}),
        );
        m.select("6").await.unwrap();

        transport(&m).push_json(200, json!({"success": true, "message": "ok"}));
        transport(&m).push_json(
            200,
            json!({"success": true, "contactId": "5", "zip": "10001", "city": "New York", "message": "ok"}),
        );
        transport(&m).push_json(200, list_of(Some("10001"), Some("New York")));

        let outcome = m.update_zip_and_city("5", "10001").await.unwrap();
        assert!(matches!(outcome, LocationUpdate::Updated { .. }));
        assert_eq!(m.selected().map(|c| c.id.as_str()), Some("6"));
        assert_eq!(
            transport(&m).paths(),
            [
                format!("{BASE}/contact-info/6"),
                format!("{BASE}/update-zip/5"),
                format!("{BASE}/update-city/5"),
                format!("{BASE}/list-contacts?limit=50"),
            ]
        );
    }

    #[tokio::test]
    async fn partial_failure_still_reloads() {
        let mut m = manager();
        transport(&m).push_json(
            200,
            json!({"success": true, "message": "ok", "contact": contact_json("5", None, None, Some("99999"), None)}),
        );
        transport(&m).push_json(
            200,
            json!({"success": false, "contactId": "5", "zip": "99999", "city": "", "message": "unknown ZIP"}),
        );
        transport(&m).push_json(200, list_of(Some("99999"), None));

        let outcome = m.update_zip_and_city("5", "99999").await.unwrap();
        assert!(outcome.is_partial());
        assert_eq!(m.contacts()[0].properties.zip.as_deref(), Some("99999"));
        assert_eq!(transport(&m).requests().len(), 3);
    }

    #[tokio::test]
    async fn status_error_still_reloads_and_is_returned() {
        let mut m = manager();
        transport(&m).push_json(500, json!({"error": "boom"}));
        transport(&m).push_json(200, list_of(None, None));

        let err = m.update_zip_and_city("5", "10001").await.unwrap_err();
        assert_eq!(err.to_string(), "boom");
        assert_eq!(m.contacts().len(), 1);
        assert!(!m.is_stale());
    }

    #[tokio::test]
    async fn failed_reload_marks_stale_without_hiding_outcome() {
        let mut m = manager();
        transport(&m).push_json(
            200,
            json!({"success": false, "message": "rejected", "contact": contact_json("5", None, None, None, None)}),
        );
        transport(&m).push_failure("connection reset");

        let outcome = m.update_zip_and_city("5", "10001").await.unwrap();
        assert!(matches!(outcome, LocationUpdate::ZipRejected { .. }));
        assert!(m.is_stale());
    }

    #[tokio::test]
    async fn validation_failure_skips_reload() {
        let mut m = manager();
        let err = m.update_zip_and_city("5", "abc").await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert!(transport(&m).requests().is_empty());
    }
}
