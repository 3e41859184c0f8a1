//! Route labels for request spans and metrics.

const UNMATCHED: &str = "unmatched";

/// Maps a request path onto the route template that serves it.
///
/// Labels come from a fixed set so client-chosen path segments never create
/// new metric series. Paths outside the route table share one label.
pub(super) fn route_label(path: &str) -> &'static str {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match segments.as_slice() {
        [] => "/",
        ["products"] => "/products",
        ["product", "Create"] => "/product/Create",
        ["product", "Update", _] => "/product/Update/{id}",
        ["product", "Delete", _] => "/product/Delete/{id}",
        ["product", _] => "/product/{id}",
        ["shutdown"] => "/shutdown",
        ["healthcheck"] => "/healthcheck",
        ["metrics"] => "/metrics",
        ["api-doc", "openapi.json"] => "/api-doc/openapi.json",
        ["docs", ..] => "/docs",
        _ => UNMATCHED,
    }
}
