//! The site's route table and page-label derivation.
//!
//! The tracking core only needs a label per path; access levels exist so the
//! host's guard layer can gate the analytics dashboard without this crate
//! ever inspecting identity state.

/// Whether the host may render a route without an authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Protected,
}

const HOME_LABEL: &str = "Home";

/// Known routes. Anything else resolves through best-effort derivation.
const ROUTES: &[(&str, &str, Access)] = &[
    ("/", HOME_LABEL, Access::Public),
    ("/partner", "Partner", Access::Public),
    ("/contact", "Contact", Access::Public),
    ("/analytics", "Analytics", Access::Protected),
    ("/sign-in", "Sign In", Access::Public),
    ("/sign-up", "Sign Up", Access::Public),
];

pub fn access_for_path(path: &str) -> Access {
    ROUTES
        .iter()
        .find(|(route, _, _)| *route == path)
        .map(|(_, _, access)| *access)
        .unwrap_or(Access::Public)
}

/// Human-readable label for a path.
///
/// Known routes use the route table. Unknown paths fall back to the trailing
/// non-empty segment with each hyphen-separated word capitalized, so
/// `/partner-program` reads "Partner Program". Never fails; a path with no
/// usable segment falls back to the home label.
pub fn page_name_for_path(path: &str) -> String {
    if let Some((_, label, _)) = ROUTES.iter().find(|(route, _, _)| *route == path) {
        return (*label).to_string();
    }

    let segment = path
        .split('/')
        .filter(|part| !part.is_empty())
        .next_back()
        .unwrap_or("");
    if segment.is_empty() {
        return HOME_LABEL.to_string();
    }

    segment
        .split('-')
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
