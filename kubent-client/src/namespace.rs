//! Working out which namespace the current process acts in
use std::path::PathBuf;

/// Namespace used when nothing else is known
pub const DEFAULT_NAMESPACE: &str = "default";

/// Environment variable checked for a namespace override
pub const NAMESPACE_ENV: &str = "POD_NAMESPACE";

/// File mounted into in-cluster workloads holding their namespace
pub const SERVICE_ACCOUNT_NAMESPACE_FILE: &str = "/var/run/secrets/kubernetes.io/serviceaccount/namespace";

/// Resolves the current namespace from layered sources.
///
/// Later sources win: the literal `"default"`, the configured namespace,
/// the environment variable, and finally the service account file.
/// Every value is trimmed. A source that is set but blank (an empty `POD_NAMESPACE`,
/// an empty mounted file) counts as unset and leaves the earlier choice in place,
/// so a blank namespace never reaches a request path.
#[derive(Clone, Debug)]
pub struct NamespaceResolver {
    env_var: String,
    namespace_file: PathBuf,
}

impl Default for NamespaceResolver {
    fn default() -> Self {
        Self {
            env_var: NAMESPACE_ENV.into(),
            namespace_file: SERVICE_ACCOUNT_NAMESPACE_FILE.into(),
        }
    }
}

impl NamespaceResolver {
    /// Read the override from a different environment variable
    #[must_use]
    pub fn env_var(mut self, name: impl Into<String>) -> Self {
        self.env_var = name.into();
        self
    }

    /// Read the in-cluster namespace from a different file
    #[must_use]
    pub fn namespace_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.namespace_file = path.into();
        self
    }

    /// Resolve against the process environment
    pub fn resolve(&self, configured: Option<&str>) -> String {
        self.resolve_with(configured, |key| std::env::var(key).ok())
    }

    /// Resolve with an explicit environment lookup
    pub fn resolve_with<F>(&self, configured: Option<&str>, env_lookup: F) -> String
    where
        F: FnOnce(&str) -> Option<String>,
    {
        let mut namespace = DEFAULT_NAMESPACE.to_string();
        if let Some(ns) = kubent_core::descriptor::non_blank(configured) {
            namespace = ns.to_string();
        }
        if let Some(ns) = kubent_core::descriptor::non_blank(env_lookup(&self.env_var).as_deref()) {
            namespace = ns.to_string();
        }
        if let Some(ns) = self.read_namespace_file() {
            namespace = ns;
        }
        namespace
    }

    fn read_namespace_file(&self) -> Option<String> {
        match std::fs::read_to_string(&self.namespace_file) {
            Ok(content) => {
                let trimmed = content.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(path = %self.namespace_file.display(), "unreadable namespace file: {e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn without_file() -> NamespaceResolver {
        let dir = tempfile::tempdir().unwrap();
        NamespaceResolver::default().namespace_file(dir.path().join("absent"))
    }

    #[test]
    fn falls_back_to_default() {
        let ns = without_file().resolve_with(None, |_| None);
        assert_eq!(ns, "default");
        let ns = without_file().resolve_with(Some("  "), |_| Some(String::new()));
        assert_eq!(ns, "default");
    }

    #[test]
    fn configured_then_env() {
        assert_eq!(without_file().resolve_with(Some("apps"), |_| None), "apps");
        let ns = without_file().resolve_with(Some("apps"), |key| {
            assert_eq!(key, "POD_NAMESPACE");
            Some("from-env".into())
        });
        assert_eq!(ns, "from-env");
    }

    #[test]
    fn custom_env_var() {
        let ns = without_file()
            .env_var("MY_NS")
            .resolve_with(None, |key| (key == "MY_NS").then(|| "mine".to_string()));
        assert_eq!(ns, "mine");
    }

    #[test]
    fn file_wins_and_is_trimmed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "  in-cluster  ").unwrap();
        let resolver = NamespaceResolver::default().namespace_file(file.path());
        let ns = resolver.resolve_with(Some("apps"), |_| Some("from-env".into()));
        assert_eq!(ns, "in-cluster");
    }

    #[test]
    fn blank_env_var_keeps_configured() {
        let ns = without_file().resolve_with(Some(" apps "), |_| Some(" \t".into()));
        assert_eq!(ns, "apps");
        let ns = without_file().resolve_with(None, |_| Some(" from-env\n".into()));
        assert_eq!(ns, "from-env");
    }

    #[test]
    fn blank_file_is_ignored() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let resolver = NamespaceResolver::default().namespace_file(file.path());
        assert_eq!(resolver.resolve_with(Some("apps"), |_| None), "apps");
    }
}
