use serde::Deserialize;

/// Extractor para rutas /users/{id}
///
/// The segment stays a raw string; the coordinator owns id validation.
#[derive(Debug, Deserialize)]
pub struct UserIdPath {
    pub id: String,
}
