//! Mock identity provider.
//!
//! Produces a synthetic identity after a fixed simulated delay. This is not
//! authentication and must never be treated as a security boundary.

use archgo_core::Result;
use archgo_core::identity::{Identity, IdentityProvider, LoginRequest};
use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;

pub const DEFAULT_DISPLAY_NAME: &str = "Senior Architect";
const EMAIL_DOMAIN: &str = "architect-go.dev";
const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Identity stub standing in for an OAuth/SAML client.
#[derive(Debug, Clone)]
pub struct MockIdentityProvider {
    delay: Duration,
}

impl MockIdentityProvider {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for MockIdentityProvider {
    fn default() -> Self {
        Self::new(Duration::from_millis(1500))
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn login(&self, request: LoginRequest) -> Result<Identity> {
        tokio::time::sleep(self.delay).await;

        let name = match request.display_name.trim() {
            "" => DEFAULT_DISPLAY_NAME.to_string(),
            trimmed => trimmed.to_string(),
        };

        let identity = Identity {
            id: random_user_id(),
            email: derive_email(&name),
            avatar: format!(
                "https://api.dicebear.com/7.x/avataaars/svg?seed={}&backgroundColor=b6e3f4",
                name
            ),
            name,
            role: request.role,
        };

        tracing::info!("[Identity] Signed in {} as {}", identity.id, identity.role);
        Ok(identity)
    }
}

fn random_user_id() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..9)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect();
    format!("usr_{suffix}")
}

fn derive_email(name: &str) -> String {
    let local = name
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(".");
    format!("{local}@{EMAIL_DOMAIN}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use archgo_core::identity::Role;

    #[tokio::test(start_paused = true)]
    async fn test_login_builds_synthetic_identity() {
        let provider = MockIdentityProvider::default();
        let identity = provider
            .login(LoginRequest::new("Jane  Doe", Role::Engineer))
            .await
            .unwrap();

        assert_eq!(identity.name, "Jane  Doe");
        assert_eq!(identity.email, "jane.doe@architect-go.dev");
        assert_eq!(identity.role, Role::Engineer);
        assert!(identity.avatar.contains("seed=Jane  Doe"));
        assert!(identity.id.starts_with("usr_"));
        assert_eq!(identity.id.len(), 13);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_name_falls_back() {
        let provider = MockIdentityProvider::new(Duration::ZERO);
        let identity = provider
            .login(LoginRequest::new("   ", Role::Architect))
            .await
            .unwrap();

        assert_eq!(identity.name, DEFAULT_DISPLAY_NAME);
        assert_eq!(identity.email, "senior.architect@architect-go.dev");
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_waits_for_delay() {
        let provider = MockIdentityProvider::new(Duration::from_millis(1500));
        let start = tokio::time::Instant::now();
        provider
            .login(LoginRequest::new("A", Role::Architect))
            .await
            .unwrap();
        assert!(start.elapsed() >= Duration::from_millis(1500));
    }

    #[test]
    fn test_user_ids_differ() {
        assert_ne!(random_user_id(), random_user_id());
    }
}
