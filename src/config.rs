pub const LOCAL_API_BASE: &str = "http://127.0.0.1:8000";
const PROXY_HOST_SUFFIX: &str = "vercel.app";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base: String,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base = resolve_api_base(
            lookup("INTAKE_API_BASE").as_deref(),
            lookup("INTAKE_PUBLIC_HOST").as_deref(),
        )?;

        let log_level = env_or(&lookup, "INTAKE_LOG_LEVEL", "warn");

        Ok(Config {
            api_base,
            log_level,
        })
    }
}

/// An explicit override wins. Otherwise a client served from the hosting
/// platform talks to the `/api` proxy on its own origin, and anything else
/// talks to a backend on the local machine.
pub fn resolve_api_base(
    override_base: Option<&str>,
    public_host: Option<&str>,
) -> Result<String, String> {
    if let Some(base) = override_base.map(str::trim).filter(|s| !s.is_empty()) {
        if !base.starts_with("http://") && !base.starts_with("https://") {
            return Err(format!(
                "Invalid INTAKE_API_BASE '{base}': expected an http(s) URL"
            ));
        }
        return Ok(base.trim_end_matches('/').to_string());
    }

    match public_host.map(str::trim).filter(|h| !h.is_empty()) {
        Some(host) if host.ends_with(PROXY_HOST_SUFFIX) => Ok(format!("https://{host}/api")),
        _ => Ok(LOCAL_API_BASE.to_string()),
    }
}

fn env_or<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).unwrap_or_else(|| default.to_string())
}
