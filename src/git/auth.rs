//! Credentials for libgit2 remote connections
//!
//! Public forges need none; private ones go through the same places git
//! itself looks: the SSH agent, keys in ~/.ssh/ and credential helpers.

use git2::{Cred, CredentialType, Error, ErrorClass, ErrorCode, RemoteCallbacks};

const SSH_KEY_NAMES: &[&str] = &["id_ed25519", "id_rsa", "id_ecdsa"];

fn auth_failed(message: &str) -> Error {
    Error::new(ErrorCode::Auth, ErrorClass::Http, message)
}

fn ssh_key_from_disk(username: &str) -> Result<Cred, Error> {
    let ssh_dir = dirs::home_dir().unwrap_or_default().join(".ssh");

    SSH_KEY_NAMES
        .iter()
        .map(|name| ssh_dir.join(name))
        .filter(|private_key| private_key.exists())
        .find_map(|private_key| {
            let public_key = private_key.with_extension("pub");
            let public_key = public_key.exists().then_some(public_key);
            Cred::ssh_key(username, public_key.as_deref(), &private_key, None).ok()
        })
        .ok_or_else(|| auth_failed("no usable SSH key found"))
}

fn credential_helper(url: &str, username_from_url: Option<&str>) -> Result<Cred, Error> {
    let config = git2::Config::open_default().or_else(|_| git2::Config::new())?;

    Cred::credential_helper(&config, url, username_from_url)
        .or_else(|_| Cred::userpass_plaintext(username_from_url.unwrap_or(""), ""))
}

/// Install a credentials callback that defers to git's native mechanisms
pub fn setup_auth_callbacks(callbacks: &mut RemoteCallbacks) {
    callbacks.credentials(|url, username_from_url, allowed_types| {
        if allowed_types.contains(CredentialType::DEFAULT) {
            return Cred::default();
        }

        if allowed_types.contains(CredentialType::SSH_KEY) {
            let username = username_from_url.unwrap_or("git");
            return Cred::ssh_key_from_agent(username).or_else(|_| ssh_key_from_disk(username));
        }

        if allowed_types.contains(CredentialType::USER_PASS_PLAINTEXT) {
            return credential_helper(url, username_from_url);
        }

        Err(auth_failed("authentication failed"))
    });
}
