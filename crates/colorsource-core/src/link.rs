/// Style name reserved for hyperlink targets.
///
/// Runs under this style become `a` elements whose `href` is the run's own text.
pub const LINK_STYLE: &str = "sh_url";

const MAILTO: &str = "mailto:";

/// Turn the text covered by a link run into a link destination.
///
/// One layer of surrounding angle brackets is stripped, and a `mailto:` scheme is prepended
/// to addresses containing `@` that do not already carry it.
pub fn link_destination(text: &str) -> String {
    let url = text
        .strip_prefix('<')
        .and_then(|rest| rest.strip_suffix('>'))
        .unwrap_or(text);

    if is_email_address(url) {
        format!("{MAILTO}{url}")
    } else {
        url.to_string()
    }
}

fn is_email_address(url: &str) -> bool {
    !url.starts_with(MAILTO) && url.contains('@')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angle_brackets_are_stripped_once() {
        assert_eq!(link_destination("<http://a.b/>"), "http://a.b/");
        assert_eq!(link_destination("<<x>>"), "<x>");
        assert_eq!(link_destination("<"), "<");
        assert_eq!(link_destination("<>"), "");
    }

    #[test]
    fn test_mailto_is_prepended_for_addresses() {
        assert_eq!(
            link_destination("<user@example.com>"),
            "mailto:user@example.com"
        );
        assert_eq!(
            link_destination("mailto:user@example.com"),
            "mailto:user@example.com"
        );
        assert_eq!(link_destination("http://example.com"), "http://example.com");
    }
}
