//! `Link` header parsing for paginated list endpoints

/// Extracts the page number of the `rel="next"` link, if any.
///
/// GitHub sends links as `<url>; rel="next", <url>; rel="last"`. Only the
/// `page` query parameter of the next link is needed to continue.
pub fn next_page(link_header: &str) -> Option<u32> {
    link_header
        .split(',')
        .filter_map(|part| {
            let mut pieces = part.split(';');
            let url = pieces.next()?.trim();
            let is_next = pieces.any(|param| {
                let param = param.trim();
                param == "rel=\"next\"" || param == "rel=next"
            });
            is_next.then_some(url)
        })
        .find_map(|url| {
            let url = url.strip_prefix('<')?.strip_suffix('>')?;
            let (_, query) = url.split_once('?')?;
            query
                .split('&')
                .filter_map(|pair| pair.split_once('='))
                .find(|(key, _)| *key == "page")
                .and_then(|(_, value)| value.parse().ok())
        })
}
