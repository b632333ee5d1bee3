/// Endpoints the client talks to. These used to be inline literals at the
/// call sites; centralizing them leaves one place to patch per deployment.
/// Browser build, so there is no environment lookup at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the prediction service (`/predict`, `/predictions`).
    pub prediction_base: String,
    /// Base URL of the hosted database's REST surface.
    pub db_base: String,
    /// Service key sent with every database request.
    pub db_api_key: String,
    /// Where the (external) login and register flows live.
    pub login_url: String,
    pub register_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prediction_base: "http://localhost:8000".to_string(),
            db_base: "http://localhost:54321".to_string(),
            db_api_key: "anon-local-dev-key".to_string(),
            login_url: "/login".to_string(),
            register_url: "/register".to_string(),
        }
    }
}
