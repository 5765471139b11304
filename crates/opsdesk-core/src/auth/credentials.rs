use anyhow::{Context, Result};
use keyring::Entry;

use super::TokenStore;

const SERVICE_NAME: &str = "opsdesk";

/// Keychain account the bearer token is stored under
const TOKEN_ACCOUNT: &str = "bearer-token";

/// Token kept in the OS keychain.
pub struct KeyringTokenStore {
    account: String,
}

impl KeyringTokenStore {
    pub fn new() -> Self {
        Self {
            account: TOKEN_ACCOUNT.to_string(),
        }
    }

    /// Scope the entry to one backend so two servers don't share a token.
    pub fn for_backend(base_url: &str) -> Self {
        Self {
            account: format!("{}@{}", TOKEN_ACCOUNT, base_url),
        }
    }

    fn entry(&self) -> Result<Entry> {
        Entry::new(SERVICE_NAME, &self.account).context("Failed to create keyring entry")
    }
}

impl Default for KeyringTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenStore for KeyringTokenStore {
    fn get(&self) -> Result<Option<String>> {
        match self.entry()?.get_password() {
            Ok(token) if !token.is_empty() => Ok(Some(token)),
            Ok(_) | Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e).context("Failed to retrieve token from keychain"),
        }
    }

    fn set(&self, token: &str) -> Result<()> {
        self.entry()?
            .set_password(token)
            .context("Failed to store token in keychain")
    }

    fn clear(&self) -> Result<()> {
        match self.entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e).context("Failed to delete token from keychain"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::any::Any;
    use std::collections::HashMap;
    use std::sync::{Arc, Once};

    use keyring::credential::{Credential, CredentialApi, CredentialBuilderApi};
    use parking_lot::Mutex;

    use super::*;

    type Vault = Arc<Mutex<HashMap<(String, String), Vec<u8>>>>;

    /// Keychain stand-in: entries with the same service and account share
    /// one secret, like a real platform store.
    struct SharedVault(Vault);

    struct VaultEntry {
        vault: Vault,
        key: (String, String),
    }

    impl CredentialApi for VaultEntry {
        fn set_password(&self, password: &str) -> keyring::Result<()> {
            self.set_secret(password.as_bytes())
        }

        fn set_secret(&self, secret: &[u8]) -> keyring::Result<()> {
            self.vault.lock().insert(self.key.clone(), secret.to_vec());
            Ok(())
        }

        fn get_password(&self) -> keyring::Result<String> {
            let secret = self.get_secret()?;
            String::from_utf8(secret).map_err(|e| keyring::Error::BadEncoding(e.into_bytes()))
        }

        fn get_secret(&self) -> keyring::Result<Vec<u8>> {
            self.vault
                .lock()
                .get(&self.key)
                .cloned()
                .ok_or(keyring::Error::NoEntry)
        }

        fn delete_credential(&self) -> keyring::Result<()> {
            self.vault
                .lock()
                .remove(&self.key)
                .map(|_| ())
                .ok_or(keyring::Error::NoEntry)
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    impl CredentialBuilderApi for SharedVault {
        fn build(&self, _target: Option<&str>, service: &str, user: &str) -> keyring::Result<Box<Credential>> {
            Ok(Box::new(VaultEntry {
                vault: self.0.clone(),
                key: (service.to_string(), user.to_string()),
            }))
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    fn use_shared_vault() {
        static INSTALL: Once = Once::new();
        INSTALL.call_once(|| {
            keyring::set_default_credential_builder(Box::new(SharedVault(Vault::default())));
        });
    }

    #[test]
    fn test_token_survives_a_new_store_instance() {
        use_shared_vault();
        let writer = KeyringTokenStore::for_backend("http://restart.test:5007");
        writer.set("jwt").unwrap();
        assert_eq!(writer.get().unwrap().as_deref(), Some("jwt"));

        let reader = KeyringTokenStore::for_backend("http://restart.test:5007");
        assert_eq!(reader.get().unwrap().as_deref(), Some("jwt"));

        reader.clear().unwrap();
        assert_eq!(writer.get().unwrap(), None);
        // Clearing an absent entry is fine.
        writer.clear().unwrap();
    }

    #[test]
    fn test_backends_do_not_share_a_token() {
        use_shared_vault();
        let one = KeyringTokenStore::for_backend("http://one.test");
        let two = KeyringTokenStore::for_backend("http://two.test");
        one.set("first").unwrap();

        assert_eq!(two.get().unwrap(), None);
        assert_eq!(one.get().unwrap().as_deref(), Some("first"));
    }
}
