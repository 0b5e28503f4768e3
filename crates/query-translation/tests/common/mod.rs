use postgrest_query_string::string::CompiledQuery;
use postgrest_query_translation::request::Query;
use postgrest_query_translation::translation::error::Error;
use postgrest_query_translation::translation::query::translate;

/// Translate a JSON request document against the `films` collection.
pub fn translate_request(request: serde_json::Value) -> Result<CompiledQuery, Error> {
    let query: Query = serde_json::from_value(request).expect("request should deserialize");
    translate("", "films", &query)
}

/// The raw query string for a request expected to translate cleanly.
pub fn plain(request: serde_json::Value) -> String {
    translate_request(request)
        .expect("request should translate")
        .query
        .plain()
}

/// The error a request is expected to fail with.
pub fn translate_error(request: serde_json::Value) -> Error {
    translate_request(request).expect_err("request should fail to translate")
}
