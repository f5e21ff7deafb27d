use serde_json::{Map, Value};
use std::fmt;

/// What we show for each contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSummary {
    pub photo: Option<String>,
    pub name: String,
    pub email: Option<String>,
}

impl ContactSummary {
    pub fn from_contact(contact: &Value) -> Self {
        let data = contact_data(contact);
        let name = data
            .and_then(|d| d.get("name"))
            .and_then(|name| name.get("givenName"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        Self {
            photo: first_value(data, "photos"),
            name,
            email: first_value(data, "emails"),
        }
    }
}

impl fmt::Display for ContactSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = if self.name.is_empty() {
            "(no name)"
        } else {
            self.name.as_str()
        };
        write!(f, "{name:<24}")?;
        write!(f, " {:<32}", self.email.as_deref().unwrap_or("-"))?;
        write!(f, " {}", self.photo.as_deref().unwrap_or("-"))
    }
}

/// Whether a contact is worth showing: it has an email, and its primary
/// photo is an actual photo.
///
/// `absentPhoto` marks a contact that has photos, none of which is primary.
pub fn is_visible(contact: &Value) -> bool {
    let Some(data) = contact_data(contact) else {
        return false;
    };
    let has_emails = non_empty_array(data, "emails").is_some();
    let primary_photo = non_empty_array(data, "photos").map(|photos| &photos[0]);
    let photo_is_present = primary_photo
        .is_some_and(|photo| photo.get("type").and_then(Value::as_str) != Some("absentPhoto"));

    has_emails && photo_is_present
}

/// The visible contacts across scroll pages, in order.
pub fn visible_contacts(pages: &[Value]) -> Vec<&Value> {
    pages
        .iter()
        .filter_map(|page| page.get("contacts").and_then(Value::as_array))
        .flatten()
        .filter(|contact| is_visible(contact))
        .collect()
}

fn contact_data(contact: &Value) -> Option<&Map<String, Value>> {
    contact.get("contactData").and_then(Value::as_object)
}

fn non_empty_array<'a>(data: &'a Map<String, Value>, field: &str) -> Option<&'a Vec<Value>> {
    data.get(field)
        .and_then(Value::as_array)
        .filter(|values| !values.is_empty())
}

fn first_value(data: Option<&Map<String, Value>>, field: &str) -> Option<String> {
    let values = non_empty_array(data?, field)?;
    values[0]
        .get("value")
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn ada() -> Value {
        json!({
            "contactId": "1",
            "contactData": {
                "name": {"givenName": "Ada", "familyName": "Lovelace"},
                "emails": [{"value": "ada@example.com"}, {"value": "other@example.com"}],
                "photos": [{"value": "https://img.example/ada.jpg", "type": "profile"}]
            }
        })
    }

    #[test]
    fn summarizes_first_photo_and_email() {
        assert_eq!(
            ContactSummary::from_contact(&ada()),
            ContactSummary {
                photo: Some("https://img.example/ada.jpg".to_string()),
                name: "Ada".to_string(),
                email: Some("ada@example.com".to_string()),
            }
        );
    }

    #[test]
    fn summary_tolerates_missing_fields() {
        let summary = ContactSummary::from_contact(&json!({"contactData": {}}));
        assert_eq!(
            summary,
            ContactSummary {
                photo: None,
                name: String::new(),
                email: None,
            }
        );
        assert!(summary.to_string().starts_with("(no name)"));
    }

    #[test]
    fn visibility_rules() {
        assert!(is_visible(&ada()));

        let mut no_email = ada();
        no_email["contactData"]["emails"] = json!([]);
        assert!(!is_visible(&no_email));

        let mut absent_photo = ada();
        absent_photo["contactData"]["photos"] = json!([{"type": "absentPhoto"}]);
        assert!(!is_visible(&absent_photo));

        let mut no_photos = ada();
        no_photos["contactData"]
            .as_object_mut()
            .unwrap()
            .remove("photos");
        assert!(!is_visible(&no_photos));

        assert!(!is_visible(&json!({"contactId": "2"})));
    }

    #[test]
    fn collects_visible_contacts_across_pages() {
        let pages = vec![
            json!({"contacts": [ada(), {"contactData": {}}], "cursor": "x"}),
            json!({"contacts": [ada()]}),
            json!({"unexpected": true}),
        ];
        assert_eq!(visible_contacts(&pages).len(), 2);
    }
}
