//! Listing helpers: name search and name ordering.

use super::domain::ListedContact;

/// Keep contacts whose first or last name contains `query`, ignoring case.
/// A blank query keeps everything.
pub fn filter_by_name(contacts: Vec<ListedContact>, query: &str) -> Vec<ListedContact> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return contacts;
    }
    contacts
        .into_iter()
        .filter(|lc| {
            lc.contact.first_name.to_lowercase().contains(&needle)
                || lc.contact.last_name.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Stable sort by lowercase first name, then lowercase last name.
pub fn sort_by_name(contacts: &mut [ListedContact]) {
    contacts.sort_by_cached_key(|lc| {
        (lc.contact.first_name.to_lowercase(), lc.contact.last_name.to_lowercase())
    });
}
