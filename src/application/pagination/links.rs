//! Pagination link calculation
//!
//! Links are the current request URL with only the offset and limit query
//! parameters replaced. Everything else in the query string, filters and sort
//! orders included, is carried over byte for byte.

use std::borrow::Cow;

use tracing::warn;
use url::{form_urlencoded, Url};

use super::context::PaginationContext;
use super::parameters::MAX_OFFSET;
use crate::domain::{PageWindow, PaginationLinks};
use crate::support::errors::PaginationError;

/// Outcome of reconciling `hasMore` with the count-derived signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextPage {
    pub has_next: bool,
    /// `hasMore` and `totalResults` disagreed.
    pub conflict: bool,
}

/// Decides whether a next page exists.
///
/// With a known total the count decides; without one, `has_more` does
/// (absent means no). When both are known and disagree, either positive
/// signal wins so a next page is never under-reported.
pub fn next_page(
    window: PageWindow,
    total_results: Option<u64>,
    has_more: Option<bool>,
) -> NextPage {
    let Some(total) = total_results else {
        return NextPage {
            has_next: has_more.unwrap_or(false),
            conflict: false,
        };
    };

    let more_results = window.next_offset() < total;
    match has_more {
        None => NextPage {
            has_next: more_results,
            conflict: false,
        },
        Some(has_more) => NextPage {
            has_next: has_more || more_results,
            conflict: has_more != more_results,
        },
    }
}

/// Offset of the last page for `total_results` items in pages of `limit`.
pub fn last_offset(total_results: u64, limit: u32) -> Result<u64, PaginationError> {
    if limit == 0 {
        return Err(PaginationError::ZeroLimit { total_results });
    }

    let limit = u64::from(limit);
    if total_results % limit == 0 {
        Ok(total_results.saturating_sub(limit))
    } else {
        Ok(total_results / limit * limit)
    }
}

/// Computes first/prev/next/last for the page at `window`.
///
/// `last` needs `total_results`; a zero limit with a known total cannot
/// produce one and is reported as [`PaginationError::ZeroLimit`]. No `next`
/// link is produced when its offset would exceed [`MAX_OFFSET`].
pub fn compute_links(
    url: &Url,
    context: &PaginationContext,
    window: PageWindow,
    total_results: Option<u64>,
    has_more: Option<bool>,
) -> Result<PaginationLinks, PaginationError> {
    let link = |offset: u64| paginated_url(url, context, offset, window.limit);

    let last = match total_results {
        Some(total) => Some(link(last_offset(total, window.limit)?)),
        None => None,
    };

    let decision = next_page(window, total_results, has_more);
    if decision.conflict {
        warn!(
            has_more = ?has_more,
            total_results = ?total_results,
            url = %url,
            "Conflict between hasMore and totalResults; next page link will be generated anyway"
        );
    }
    // A next offset outside the signed range could not be requested again.
    let next_offset = window.next_offset();
    let next = (decision.has_next && next_offset <= MAX_OFFSET).then(|| link(next_offset));

    let prev = (window.offset != 0).then(|| link(window.prev_offset()));

    Ok(PaginationLinks {
        first: link(0),
        prev,
        next,
        last,
    })
}

/// `url` with the context's offset and limit parameters set to the given values.
pub fn paginated_url(url: &Url, context: &PaginationContext, offset: u64, limit: u32) -> String {
    let query = replace_query_params(
        url.query(),
        &[
            (context.offset_param(), offset.to_string()),
            (context.limit_param(), limit.to_string()),
        ],
    );

    let mut link = url.clone();
    link.set_query(Some(&query));
    link.set_fragment(None);
    link.into()
}

/// Replaces each named pair in place, dropping repeats of the same name, and
/// appends the ones the query did not carry. Other segments are untouched.
fn replace_query_params(query: Option<&str>, replacements: &[(&str, String)]) -> String {
    let mut written = vec![false; replacements.len()];
    let mut segments: Vec<Cow<'_, str>> = Vec::new();

    for segment in query.unwrap_or_default().split('&') {
        if segment.is_empty() {
            continue;
        }

        let key = form_urlencoded::parse(segment.as_bytes())
            .next()
            .map(|(key, _)| key);
        let position = key.and_then(|key| replacements.iter().position(|(name, _)| key == *name));

        match position {
            Some(i) if written[i] => {}
            Some(i) => {
                written[i] = true;
                let (name, value) = &replacements[i];
                segments.push(Cow::Owned(encode_pair(name, value)));
            }
            None => segments.push(Cow::Borrowed(segment)),
        }
    }

    for (i, (name, value)) in replacements.iter().enumerate() {
        if !written[i] {
            segments.push(Cow::Owned(encode_pair(name, value)));
        }
    }

    segments.join("&")
}

fn encode_pair(name: &str, value: &str) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair(name, value)
        .finish()
}
