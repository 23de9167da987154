/// CORS for the tool endpoints. Host runtimes only list tools and post
/// lookups, so only GET, POST and preflight are allowed. An empty origin
/// list admits any origin.
pub fn cors(allowed_origins: &[String]) -> warp::cors::Builder {
    let builder = warp::cors()
        .allow_headers(vec!["Content-Type", "Authorization", "Accept"])
        .allow_methods(vec!["GET", "POST", "OPTIONS"]);

    if allowed_origins.is_empty() {
        builder.allow_any_origin()
    } else {
        builder.allow_origins(allowed_origins.iter().map(String::as_str))
    }
}
