//! APK signing credential.
//!
//! Builds are signed with the pre-generated debug keystore from the tools
//! directory (alias `androiddebugkey`, subject `CN=Android Debug,O=Android,C=US`).
//! Generating that keystore is part of provisioning the tools directory,
//! not of the build.

use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

/// Well-known passphrase of the Android debug keystore.
pub const DEBUG_KEYSTORE_PASSWORD: &str = "android";

/// Keystore plus the passphrases `apksigner` needs to unlock it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningCredential {
    keystore: PathBuf,
    store_password: String,
    key_password: String,
}

impl SigningCredential {
    /// The debug credential: `keystore` unlocked with `android`/`android`.
    pub fn debug(keystore: &Path) -> Self {
        Self {
            keystore: keystore.to_path_buf(),
            store_password: DEBUG_KEYSTORE_PASSWORD.to_string(),
            key_password: DEBUG_KEYSTORE_PASSWORD.to_string(),
        }
    }

    /// `apksigner sign` arguments selecting this credential.
    pub fn signer_args(&self) -> Vec<OsString> {
        vec![
            "--ks".into(),
            self.keystore.clone().into_os_string(),
            "--ks-pass".into(),
            format!("pass:{}", self.store_password).into(),
            "--key-pass".into(),
            format!("pass:{}", self.key_password).into(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_credential_args() {
        let cred = SigningCredential::debug(Path::new("/tools/debug.keystore"));
        assert_eq!(
            cred.signer_args(),
            vec![
                OsString::from("--ks"),
                OsString::from("/tools/debug.keystore"),
                OsString::from("--ks-pass"),
                OsString::from("pass:android"),
                OsString::from("--key-pass"),
                OsString::from("pass:android"),
            ]
        );
    }
}
