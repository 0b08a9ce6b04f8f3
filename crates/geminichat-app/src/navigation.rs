//! Route table shared by the terminal and web front ends.

pub const CHAT_PATH: &str = "/Chat";
pub const LOGIN_PATH: &str = "/Login";
pub const NOT_FOUND_PATH: &str = "/404";

/// Views reachable by path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Chat,
    Login,
    NotFound,
}

impl Page {
    pub fn path(&self) -> &'static str {
        match self {
            Page::Chat => CHAT_PATH,
            Page::Login => LOGIN_PATH,
            Page::NotFound => NOT_FOUND_PATH,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Chat => "Chat",
            Page::Login => "Login",
            Page::NotFound => "Page not found",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Show(Page),
    /// Replace the current location with this path
    Redirect(&'static str),
}

/// Resolve a location path. Matching ignores ASCII case, one trailing slash,
/// and any query string or fragment.
pub fn resolve(path: &str) -> Navigation {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let path = match path.strip_suffix('/') {
        Some(stripped) if !stripped.is_empty() => stripped,
        _ => path,
    };

    if path.is_empty() || path == "/" {
        return Navigation::Redirect(CHAT_PATH);
    }

    [Page::Chat, Page::Login, Page::NotFound]
        .into_iter()
        .find(|page| path.eq_ignore_ascii_case(page.path()))
        .map(Navigation::Show)
        .unwrap_or(Navigation::Redirect(NOT_FOUND_PATH))
}

/// The page finally shown for `path`, following redirects
pub fn page_for(path: &str) -> Page {
    let mut target = path;
    // every redirect target is itself a shown page, so this ends after one hop
    for _ in 0..2 {
        match resolve(target) {
            Navigation::Show(page) => return page,
            Navigation::Redirect(next) => target = next,
        }
    }
    Page::NotFound
}
