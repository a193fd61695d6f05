//! View rendering boundary.
//!
//! Handlers hand a page name and a `TemplateData` bag to a `Renderer` and get
//! HTML back. The built-in `PageRenderer` keeps the markup deliberately
//! minimal; it exists so the binary is self-contained, and tests can swap in
//! their own implementation through the same trait.

use chrono::{Datelike, Utc};
use thiserror::Error;

use crate::error::AppError;
use crate::forms::Form;
use crate::models::Snippet;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("the page {0:?} does not exist")]
    UnknownPage(String),
}

impl From<RenderError> for AppError {
    fn from(err: RenderError) -> Self {
        AppError::Render(err.to_string())
    }
}

/// Everything a page render can draw from. Built fresh per request.
#[derive(Debug, Clone, Default)]
pub struct TemplateData {
    pub current_year: i32,
    pub flash: Option<String>,
    pub form: Option<Form>,
    pub snippet: Option<Snippet>,
    pub snippets: Vec<Snippet>,
    pub is_authenticated: bool,
    pub csrf_token: String,
}

impl TemplateData {
    pub fn new() -> Self {
        TemplateData {
            current_year: Utc::now().year(),
            ..TemplateData::default()
        }
    }
}

/// View-rendering collaborator consumed by the handlers.
pub trait Renderer: Send + Sync {
    fn render(&self, page: &str, data: &TemplateData) -> Result<String, RenderError>;
}

/// Built-in renderer producing small server-rendered pages.
pub struct PageRenderer;

impl Renderer for PageRenderer {
    fn render(&self, page: &str, data: &TemplateData) -> Result<String, RenderError> {
        let body = match page {
            "home" => home(data),
            "show" => show(data),
            "create" => create(data),
            "signup" => signup(data),
            "login" => login(data),
            other => return Err(RenderError::UnknownPage(other.to_string())),
        };
        Ok(layout(page, &body, data))
    }
}

/// Escape text for interpolation into HTML element content or attributes.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str, data: &TemplateData) -> String {
    let nav = if data.is_authenticated {
        format!(
            "<a href=\"/snippet/create\">Create snippet</a> \
             <form action=\"/user/logout\" method=\"POST\">\
             <input type=\"hidden\" name=\"csrf_token\" value=\"{}\">\
             <button>Logout</button></form>",
            escape(&data.csrf_token)
        )
    } else {
        "<a href=\"/user/signup\">Signup</a> <a href=\"/user/login\">Login</a>".to_string()
    };

    let flash = data
        .flash
        .as_deref()
        .map(|f| format!("<div class=\"flash\">{}</div>", escape(f)))
        .unwrap_or_default();

    format!(
        "<!doctype html><html><head><title>{} - Snipbin</title></head><body>\
         <nav><a href=\"/\">Home</a> {nav}</nav>{flash}<main>{body}</main>\
         <footer>Snipbin {}</footer></body></html>",
        escape(title),
        data.current_year
    )
}

/// One `<label class="error">` per recorded message for the field.
fn field_errors(form: &Form, field: &str) -> String {
    form.errors
        .all(field)
        .iter()
        .map(|msg| format!("<label class=\"error\">{}</label>", escape(msg)))
        .collect()
}

fn home(data: &TemplateData) -> String {
    if data.snippets.is_empty() {
        return "<p>There's nothing to see here... yet!</p>".to_string();
    }
    let rows: String = data
        .snippets
        .iter()
        .map(|s| {
            format!(
                "<tr><td><a href=\"/snippet/{}\">{}</a></td><td>{}</td></tr>",
                s.id,
                escape(&s.title),
                s.created.format("%d %b %Y at %H:%M")
            )
        })
        .collect();
    format!("<h2>Latest Snippets</h2><table>{rows}</table>")
}

fn show(data: &TemplateData) -> String {
    match &data.snippet {
        Some(s) => format!(
            "<article><h2>{}</h2><pre>{}</pre>\
             <p>Created {} &middot; Expires {}</p></article>",
            escape(&s.title),
            escape(&s.content),
            s.created.format("%d %b %Y at %H:%M"),
            s.expires.format("%d %b %Y at %H:%M")
        ),
        None => String::new(),
    }
}

fn create(data: &TemplateData) -> String {
    let form = data.form.clone().unwrap_or_default();
    let expires = form.get("expires");
    let radio = |days: &str, label: &str| {
        let checked = if expires == days { " checked" } else { "" };
        format!(
            "<label><input type=\"radio\" name=\"expires\" value=\"{days}\"{checked}> {label}</label>"
        )
    };
    format!(
        "<form action=\"/snippet/create\" method=\"POST\">\
         <input type=\"hidden\" name=\"csrf_token\" value=\"{}\">\
         <div>{}<label>Title</label>\
         <input type=\"text\" name=\"title\" value=\"{}\"></div>\
         <div>{}<label>Content</label>\
         <textarea name=\"content\">{}</textarea></div>\
         <div>{}<label>Delete in</label>{}{}{}</div>\
         <button>Publish snippet</button></form>",
        escape(&data.csrf_token),
        field_errors(&form, "title"),
        escape(form.get("title")),
        field_errors(&form, "content"),
        escape(form.get("content")),
        field_errors(&form, "expires"),
        radio("30", "One month"),
        radio("7", "One week"),
        radio("1", "One day"),
    )
}

fn signup(data: &TemplateData) -> String {
    let form = data.form.clone().unwrap_or_default();
    format!(
        "<form action=\"/user/signup\" method=\"POST\">\
         <input type=\"hidden\" name=\"csrf_token\" value=\"{}\">\
         <div>{}<label>Name</label>\
         <input type=\"text\" name=\"name\" value=\"{}\"></div>\
         <div>{}<label>Email</label>\
         <input type=\"email\" name=\"email\" value=\"{}\"></div>\
         <div>{}<label>Password</label>\
         <input type=\"password\" name=\"password\"></div>\
         <button>Signup</button></form>",
        escape(&data.csrf_token),
        field_errors(&form, "name"),
        escape(form.get("name")),
        field_errors(&form, "email"),
        escape(form.get("email")),
        field_errors(&form, "password"),
    )
}

fn login(data: &TemplateData) -> String {
    let form = data.form.clone().unwrap_or_default();
    format!(
        "<form action=\"/user/login\" method=\"POST\">\
         <input type=\"hidden\" name=\"csrf_token\" value=\"{}\">{}\
         <div><label>Email</label>\
         <input type=\"email\" name=\"email\" value=\"{}\"></div>\
         <div><label>Password</label>\
         <input type=\"password\" name=\"password\"></div>\
         <button>Login</button></form>",
        escape(&data.csrf_token),
        field_errors(&form, "generic"),
        escape(form.get("email")),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_user_content() {
        let mut data = TemplateData::new();
        data.snippet = Some(Snippet {
            id: 1,
            title: "<script>alert(1)</script>".to_string(),
            content: "a & b".to_string(),
            created: Utc::now(),
            expires: Utc::now(),
        });
        let html = PageRenderer.render("show", &data).unwrap();
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("a &amp; b"));
    }

    #[test]
    fn unknown_page_is_an_error() {
        let err = PageRenderer.render("nope", &TemplateData::new()).unwrap_err();
        assert!(matches!(err, RenderError::UnknownPage(_)));
    }

    #[test]
    fn forms_embed_the_csrf_token() {
        let mut data = TemplateData::new();
        data.csrf_token = "tok123".to_string();
        for page in ["create", "signup", "login"] {
            let html = PageRenderer.render(page, &data).unwrap();
            assert!(
                html.contains("name=\"csrf_token\" value=\"tok123\""),
                "{page} must embed the csrf token"
            );
        }
    }

    #[test]
    fn validation_messages_are_rendered() {
        let mut form = Form::empty();
        form.errors.add("password", "This field is too short (minimum is 10 characters)");
        let mut data = TemplateData::new();
        data.form = Some(form);
        let html = PageRenderer.render("signup", &data).unwrap();
        assert!(html.contains("This field is too short (minimum is 10 characters)"));
    }
}
