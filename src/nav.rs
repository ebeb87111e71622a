//! Navigation bar renderer and logout action.
//!
//! The nav is a single element with id `nav` whose content is replaced
//! wholesale on render. Which fragment is written depends only on whether a
//! user id is in the session at render time.

use std::collections::HashMap;

use askama::Template;
use thiserror::Error;

use crate::session::{Session, StorageError};

/// Id of the element the nav fragment is written into.
pub const NAV_ELEMENT_ID: &str = "nav";

/// Where logout sends the user.
pub const LOGIN_PAGE: &str = "login.html";

/// The slice of a document the nav needs: replace an element's content,
/// and navigate away.
pub trait Page {
    /// Replace the inner HTML of the element with the given id.
    /// Returns `false` when no such element exists.
    fn set_inner_html(&mut self, id: &str, html: &str) -> bool;

    fn navigate(&mut self, href: &str);
}

/// In-memory page: a set of elements by id plus the current location.
#[derive(Debug, Default, Clone)]
pub struct HtmlPage {
    elements: HashMap<String, String>,
    location: Option<String>,
}

impl HtmlPage {
    /// A page containing an empty `nav` element.
    pub fn with_nav() -> Self {
        let mut page = Self::default();
        page.add_element(NAV_ELEMENT_ID);
        page
    }

    pub fn add_element(&mut self, id: &str) {
        self.elements.entry(id.to_string()).or_default();
    }

    pub fn inner_html(&self, id: &str) -> Option<&str> {
        self.elements.get(id).map(String::as_str)
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }
}

impl Page for HtmlPage {
    fn set_inner_html(&mut self, id: &str, html: &str) -> bool {
        match self.elements.get_mut(id) {
            Some(content) => {
                *content = html.to_string();
                true
            }
            None => false,
        }
    }

    fn navigate(&mut self, href: &str) {
        self.location = Some(href.to_string());
    }
}

/// Nav fragment for a logged-in user.
#[derive(Template)]
#[template(path = "nav/authenticated.html")]
struct AuthenticatedNav<'a> {
    user_id: &'a str,
}

/// Nav fragment for an anonymous visitor.
#[derive(Template)]
#[template(path = "nav/anonymous.html")]
struct AnonymousNav;

#[derive(Debug, Error)]
pub enum NavError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Failed to render nav: {0}")]
    Render(#[from] askama::Error),
}

/// Render the nav fragment for the given user, or the anonymous one.
pub fn nav_html(user_id: Option<&str>) -> Result<String, askama::Error> {
    match user_id {
        Some(user_id) => AuthenticatedNav { user_id }.render(),
        None => AnonymousNav.render(),
    }
}

/// Render the nav for the current session into `page`.
///
/// Does nothing if the page has no `nav` element.
pub fn render_nav<P: Page + ?Sized>(session: &Session, page: &mut P) -> Result<(), NavError> {
    let html = nav_html(session.user_id()?.as_deref())?;

    if !page.set_inner_html(NAV_ELEMENT_ID, &html) {
        log::debug!("No #{} element on page, skipping render", NAV_ELEMENT_ID);
    }
    Ok(())
}

/// Clear both session keys and send the user to the login page.
pub fn logout<P: Page + ?Sized>(session: &Session, page: &mut P) -> Result<(), StorageError> {
    session.clear()?;
    page.navigate(LOGIN_PAGE);
    log::info!("Logged out");
    Ok(())
}
