//! Server-rendered HTML pages.

use std::fmt::Write as _;

use service::contacts::{ContactInput, ListedContact};

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n<body>\n{}\n</body>\n</html>\n",
        escape(title),
        body
    )
}

fn credentials_form(action: &str, submit: &str) -> String {
    format!(
        "<form method=\"post\" action=\"{action}\">\n\
         <label>Username <input name=\"username\" required></label>\n\
         <label>Password <input name=\"password\" type=\"password\" required></label>\n\
         <button type=\"submit\">{submit}</button>\n</form>"
    )
}

pub fn login_page() -> String {
    let body = format!(
        "<h1>Login</h1>\n{}\n<p><a href=\"/register\">Create an account</a></p>",
        credentials_form("/login", "Login")
    );
    layout("Login", &body)
}

pub fn register_page() -> String {
    let body = format!(
        "<h1>Register</h1>\n{}\n<p><a href=\"/login\">Back to login</a></p>",
        credentials_form("/register", "Register")
    );
    layout("Register", &body)
}

pub fn home_page(username: &str, contacts: &[ListedContact], query: &str, sorted: bool) -> String {
    let mut body = String::new();
    let _ = write!(
        body,
        "<h1>Contacts of {}</h1>\n<p><a href=\"/add\">Add contact</a> | <a href=\"/logout\">Logout</a></p>\n\
         <form method=\"get\" action=\"/\">\n<input name=\"q\" value=\"{}\" placeholder=\"Search by name\">\n\
         <label><input type=\"checkbox\" name=\"sort\" value=\"name\"{}> Sort by name</label>\n\
         <button type=\"submit\">Search</button>\n</form>\n",
        escape(username),
        escape(query),
        if sorted { " checked" } else { "" }
    );

    if contacts.is_empty() {
        body.push_str("<p>No contacts.</p>");
        return layout("Contacts", &body);
    }

    body.push_str(
        "<table>\n<tr><th>First name</th><th>Last name</th><th>Phone</th><th>Email</th>\
         <th>Address</th><th>LinkedIn</th><th>Category</th><th></th></tr>\n",
    );
    for lc in contacts {
        let c = &lc.contact;
        let _ = writeln!(
            body,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
             <td><a href=\"/edit/{idx}\">Edit</a> <a href=\"/delete/{idx}\">Delete</a></td></tr>",
            escape(&c.first_name),
            escape(&c.last_name),
            escape(&c.phone),
            escape(&c.email),
            escape(&c.address),
            escape(&c.linkedin),
            escape(&c.category),
            idx = lc.index,
        );
    }
    body.push_str("</table>");
    layout("Contacts", &body)
}

/// Add/edit form; `action` is the POST target.
pub fn contact_form_page(title: &str, action: &str, values: &ContactInput) -> String {
    let fields = [
        ("first_name", "First name", &values.first_name),
        ("last_name", "Last name", &values.last_name),
        ("phone", "Phone", &values.phone),
        ("email", "Email", &values.email),
        ("address", "Address", &values.address),
        ("linkedin", "LinkedIn", &values.linkedin),
        ("category", "Category", &values.category),
    ];
    let mut body = format!(
        "<h1>{}</h1>\n<form method=\"post\" action=\"{}\">\n",
        escape(title),
        escape(action)
    );
    for (name, label, value) in fields {
        let _ = writeln!(
            body,
            "<label>{label} <input name=\"{name}\" value=\"{}\"></label><br>",
            escape(value)
        );
    }
    body.push_str("<button type=\"submit\">Save</button>\n</form>\n<p><a href=\"/\">Cancel</a></p>");
    layout(title, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use service::contacts::Contact;

    #[test]
    fn escapes_markup() {
        assert_eq!(escape(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn home_page_links_use_stored_index() {
        let contact = Contact::new(ContactInput {
            first_name: "<Bob>".into(),
            last_name: "Lee".into(),
            ..Default::default()
        });
        let html = home_page("alice", &[ListedContact { index: 3, contact }], "bo", false);
        assert!(html.contains("href=\"/edit/3\""));
        assert!(html.contains("href=\"/delete/3\""));
        assert!(html.contains("&lt;Bob&gt;"));
        assert!(html.contains("value=\"bo\""));
    }

    #[test]
    fn empty_home_page_says_so() {
        let html = home_page("alice", &[], "", true);
        assert!(html.contains("No contacts."));
        assert!(html.contains(" checked"));
    }

    #[test]
    fn contact_form_prefills_values() {
        let values = ContactInput { phone: "555 \"0100\"".into(), ..Default::default() };
        let html = contact_form_page("Edit contact", "/edit/0", &values);
        assert!(html.contains("name=\"phone\" value=\"555 &quot;0100&quot;\""));
        assert!(html.contains("action=\"/edit/0\""));
        for field in ["first_name", "last_name", "email", "address", "linkedin", "category"] {
            assert!(html.contains(&format!("name=\"{field}\"")));
        }
    }
}
