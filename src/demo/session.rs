use fullcontact_cab::AccessToken;
use keyring::Entry;

/// Where the user's token lives between runs.
///
/// Stands in for a web app's signed session cookie: the token JSON, exactly
/// as the token endpoint returned it, stored in the platform credential store.
pub struct Session {
    entry: Entry,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("credential store: {0}")]
    Store(#[from] keyring::Error),
    #[error("stored token is unreadable: {0}")]
    Corrupt(#[from] serde_json::Error),
}

impl Session {
    pub fn open() -> Result<Self, SessionError> {
        let entry = Entry::new("fullcontact-cab", "access token")?;
        Ok(Self { entry })
    }

    /// The stored token, if the user has logged in.
    pub fn load(&self) -> Result<Option<AccessToken>, SessionError> {
        let contents = match self.entry.get_password() {
            Ok(contents) => contents,
            Err(keyring::Error::NoEntry) => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Ok(Some(AccessToken::from_json(&contents)?))
    }

    pub fn store(&self, token: &AccessToken) -> Result<(), SessionError> {
        self.entry.set_password(&token.to_json()?)?;
        Ok(())
    }

    /// Forgets the stored token. Succeeds if there was none.
    pub fn clear(&self) -> Result<(), SessionError> {
        match self.entry.delete_password() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
