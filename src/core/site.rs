use std::env;
use std::sync::{Arc, RwLock};

/// Site-wide branding and contact details. The original system kept these in
/// a mutable singleton database row; here they are process-wide state loaded
/// from the environment with an explicit reload lifecycle.
#[derive(Debug, Clone)]
pub(crate) struct SiteConfig {
    pub(crate) site_name: String,
    pub(crate) logo_url: Option<String>,
    pub(crate) hero_background_url: Option<String>,
    pub(crate) dashboard_background_url: Option<String>,
    pub(crate) whatsapp_number: Option<String>,
    pub(crate) facebook_url: Option<String>,
    pub(crate) contact_phone: Option<String>,
}

#[derive(Clone)]
pub(crate) struct SiteConfigHandle {
    inner: Arc<RwLock<SiteConfig>>,
}

impl SiteConfig {
    pub(crate) fn from_env() -> Self {
        Self {
            site_name: env_or_default("SITE_NAME", "Tutora Medical And Technical Institute"),
            logo_url: env_optional("SITE_LOGO_URL"),
            hero_background_url: env_optional("SITE_HERO_BACKGROUND_URL"),
            dashboard_background_url: env_optional("SITE_DASHBOARD_BACKGROUND_URL"),
            whatsapp_number: env_optional("SITE_WHATSAPP_NUMBER"),
            facebook_url: env_optional("SITE_FACEBOOK_URL"),
            contact_phone: env_optional("SITE_CONTACT_PHONE"),
        }
    }
}

impl SiteConfigHandle {
    pub(crate) fn load() -> Self {
        Self { inner: Arc::new(RwLock::new(SiteConfig::from_env())) }
    }

    pub(crate) fn current(&self) -> SiteConfig {
        self.inner.read().expect("site config lock poisoned").clone()
    }

    pub(crate) fn reload(&self) -> SiteConfig {
        let fresh = SiteConfig::from_env();
        let mut guard = self.inner.write().expect("site config lock poisoned");
        *guard = fresh.clone();
        tracing::info!(site_name = %fresh.site_name, "Site configuration reloaded");
        fresh
    }
}

fn env_optional(key: &str) -> Option<String> {
    env::var(key).ok().map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
}

fn env_or_default(key: &str, default: &str) -> String {
    env_optional(key).unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reload_picks_up_environment_changes() {
        std::env::remove_var("SITE_NAME");
        let handle = SiteConfigHandle::load();
        let initial = handle.current().site_name;

        std::env::set_var("SITE_NAME", "Renamed Institute");
        let reloaded = handle.reload();

        assert_eq!(reloaded.site_name, "Renamed Institute");
        assert_ne!(initial, reloaded.site_name);
        std::env::remove_var("SITE_NAME");
    }
}
