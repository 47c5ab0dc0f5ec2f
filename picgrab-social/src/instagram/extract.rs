//! Profile picture extraction.
//!
//! The picture link is found with plain substring splits, no HTML parsing:
//! the 150px thumbnail path segment anchors the match, the last `https:`
//! before it starts the link, and the first `"` after it ends the link.
//! Markup changes upstream will break this; that is accepted.
use url::Url;

/// Path segment of the 150x150 profile thumbnail.
pub const THUMBNAIL_MARKER: &str = "/s150x150/";
const SCHEME_MARKER: &str = "https:";
const QUOTE: char = '"';

/// Characters a well-formed link never contains; the URL parser would
/// silently drop or escape them instead of failing.
const FORBIDDEN: &[char] = &['\\', '<', '>', '"', '{', '}', '|'];

fn is_well_formed(link: &str) -> bool {
    !link
        .chars()
        .any(|c| c.is_ascii_whitespace() || c.is_control() || FORBIDDEN.contains(&c))
}

/// Locate the profile picture link in rendered markup.
pub fn extract_profile_image(document: &str) -> Option<Url> {
    let link = profile_image_link(document)?;
    if !is_well_formed(&link) {
        tracing::debug!(%link, "profile picture link is malformed");
        return None;
    }
    match Url::parse(&link) {
        Ok(url) => {
            tracing::debug!(link = %url, "profile picture link found");
            Some(url)
        }
        Err(err) => {
            tracing::debug!(%link, error = %err, "profile picture link does not parse");
            None
        }
    }
}

/// The unparsed link text, `None` when the marker is absent.
pub fn profile_image_link(document: &str) -> Option<String> {
    let mut links = document.split(THUMBNAIL_MARKER);
    let before = links.next()?;
    let Some(after) = links.next() else {
        tracing::debug!("no thumbnail marker in document");
        return None;
    };

    let first_part = before.rsplit(SCHEME_MARKER).next().unwrap_or(before);
    let last_part = after.split(QUOTE).next().unwrap_or(after);

    let link = format!("{SCHEME_MARKER}{first_part}{THUMBNAIL_MARKER}{last_part}");
    Some(link.replace("&amp;", "&"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reassembles_and_unescapes_link() {
        let doc = r#"...https://cdn.example.com/abc/s150x150/def.jpg?x=1&amp;y=2"more..."#;
        let url = extract_profile_image(doc).expect("link");
        assert_eq!(url.as_str(), "https://cdn.example.com/abc/s150x150/def.jpg?x=1&y=2");
    }

    #[test]
    fn no_marker_means_no_link() {
        assert_eq!(extract_profile_image("<html><body>nothing here</body></html>"), None);
        assert_eq!(extract_profile_image(""), None);
    }

    #[test]
    fn last_https_before_marker_starts_the_link() {
        let doc = concat!(
            r#"<a href="https://other.example.com/x">x</a>"#,
            r#"<img src="https://scontent.cdninstagram.com/v/t51/s150x150/123_n.jpg?_nc_ht=a&amp;oh=b">"#
        );
        assert_eq!(
            profile_image_link(doc).as_deref(),
            Some("https://scontent.cdninstagram.com/v/t51/s150x150/123_n.jpg?_nc_ht=a&oh=b")
        );
    }

    #[test]
    fn only_first_two_pieces_are_used() {
        let doc = r#""https://a.example/p/s150x150/one.jpg" "https://b.example/q/s150x150/two.jpg""#;
        assert_eq!(
            profile_image_link(doc).as_deref(),
            Some("https://a.example/p/s150x150/one.jpg")
        );
    }

    #[test]
    fn marker_without_scheme_keeps_whole_prefix() {
        // No `https:` before the marker: the whole prefix becomes the host part.
        let link = profile_image_link(r#"//cdn.example.com/s150x150/a.jpg""#);
        assert_eq!(link.as_deref(), Some("https://cdn.example.com/s150x150/a.jpg"));
    }

    #[test]
    fn unquoted_attribute_runs_into_markup() {
        let doc = "<img src=https://cdn.example.com/v/s150x150/a.jpg>\n<div class=\"x\">";
        assert_eq!(
            profile_image_link(doc).as_deref(),
            Some("https://cdn.example.com/v/s150x150/a.jpg>\n<div class=")
        );
        assert_eq!(extract_profile_image(doc), None);
    }

    #[test]
    fn json_escaped_slashes_are_not_rewritten() {
        let doc = r#""https:\/\/cdn.example.com/v/s150x150/a.jpg""#;
        assert_eq!(extract_profile_image(doc), None);
    }

    #[test]
    fn unparsable_link_yields_none() {
        let doc = "https://exa mple.com/s150x150/a.jpg\"";
        assert!(profile_image_link(doc).is_some());
        assert_eq!(extract_profile_image(doc), None);
    }
}
