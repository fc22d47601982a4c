/// Best-effort machine name for the `hostname` command, "localhost" when
/// nothing better is known.
pub fn resolve_hostname() -> String {
    std::env::var("HOSTNAME")
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| "localhost".to_string())
}
