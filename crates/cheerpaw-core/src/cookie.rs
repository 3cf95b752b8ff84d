//! Cookie lookup for the CSRF token.

use url::form_urlencoded;

/// Read the value of cookie `name` from a `Cookie` header string such as
/// `"sessionid=abc; csrftoken=xyz"`.
///
/// The name must match exactly (`csrftoken` does not match `xcsrftoken`).
/// The value is percent-decoded. Returns `None` when the cookie is absent or
/// the header is empty.
pub fn read_cookie(header: &str, name: &str) -> Option<String> {
    if header.trim().is_empty() || name.is_empty() {
        return None;
    }
    header
        .split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix(name)?.strip_prefix('='))
        .map(percent_decode)
}

fn percent_decode(raw: &str) -> String {
    // form_urlencoded treats '+' and '&' specially; cookie values keep them literally.
    let escaped = raw.replace('+', "%2B").replace('&', "%26");
    form_urlencoded::parse(format!("v={}", escaped).as_bytes())
        .next()
        .map(|(_, value)| value.into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_named_cookie() {
        let header = "sessionid=abc123; csrftoken=tok42; theme=dark";
        assert_eq!(read_cookie(header, "csrftoken").as_deref(), Some("tok42"));
        assert_eq!(read_cookie(header, "sessionid").as_deref(), Some("abc123"));
    }

    #[test]
    fn test_prefix_names_do_not_match() {
        let header = "xcsrftoken=nope; csrftoken2=nope";
        assert_eq!(read_cookie(header, "csrftoken"), None);
    }

    #[test]
    fn test_empty_header() {
        assert_eq!(read_cookie("", "csrftoken"), None);
        assert_eq!(read_cookie("   ", "csrftoken"), None);
    }

    #[test]
    fn test_value_is_percent_decoded() {
        let header = "csrftoken=a%20b%3Dc+d";
        assert_eq!(read_cookie(header, "csrftoken").as_deref(), Some("a b=c+d"));
    }

    #[test]
    fn test_empty_value() {
        assert_eq!(read_cookie("csrftoken=", "csrftoken").as_deref(), Some(""));
    }
}
