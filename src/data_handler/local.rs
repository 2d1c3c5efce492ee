//! File-backed [`DataHandler`].
//!
//! Layout under the data directory it is opened on:
//!
//! ```text
//! <data_dir>/
//!   global_data/          created on open
//!   <username>/
//!     account.json        settings, rpc nodes and credentials
//! ```
//!
//! `account.json` is rewritten after every change, so whatever a failed
//! setup managed to store stays on disk.  The password is accepted for
//! interface parity but not stored.

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{DataHandler, DataHandlerError, ModifiableSettings, RpcNode};
use crate::{
    credentials::{ExternalServiceCredential, PremiumCredentials},
    paths::{GLOBAL_DATA_DIR, is_valid_username},
};

pub const ACCOUNT_FILE: &str = "account.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub settings: ModifiableSettings,
    #[serde(default)]
    pub rpc_nodes: Vec<RpcNode>,
    #[serde(default)]
    pub premium: Option<PremiumCredentials>,
    #[serde(default)]
    pub external_services: Vec<ExternalServiceCredential>,
}

struct OpenAccount {
    file: PathBuf,
    record: AccountRecord,
}

impl OpenAccount {
    fn persist(&self) -> Result<(), DataHandlerError> {
        let bytes = serde_json::to_vec_pretty(&self.record)?;
        fs::write(&self.file, bytes)?;
        Ok(())
    }
}

pub struct LocalDataHandler {
    data_dir: PathBuf,
    open: Option<OpenAccount>,
}

impl LocalDataHandler {
    /// Prepare `data_dir` (and its global data directory) for use.
    pub fn open(data_dir: &Path) -> Result<Self, DataHandlerError> {
        fs::create_dir_all(data_dir.join(GLOBAL_DATA_DIR))?;
        Ok(Self {
            data_dir: data_dir.to_path_buf(),
            open: None,
        })
    }

    #[cfg(test)]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn account_mut(&mut self) -> Result<&mut OpenAccount, DataHandlerError> {
        self.open.as_mut().ok_or(DataHandlerError::NotLoggedIn)
    }
}

/// Read back an account written by [`LocalDataHandler`].
#[cfg(test)]
pub fn load_account(data_dir: &Path, username: &str) -> Result<AccountRecord, DataHandlerError> {
    let text = fs::read_to_string(data_dir.join(username).join(ACCOUNT_FILE))?;
    Ok(serde_json::from_str(&text)?)
}

impl DataHandler for LocalDataHandler {
    fn create_account(
        &mut self,
        username: &str,
        _password: &str,
        settings: ModifiableSettings,
    ) -> Result<(), DataHandlerError> {
        if !is_valid_username(username) {
            return Err(DataHandlerError::InvalidUsername(username.to_string()));
        }

        let user_dir = self.data_dir.join(username);
        if user_dir.exists() {
            return Err(DataHandlerError::UserExists(username.to_string()));
        }
        fs::create_dir_all(&user_dir)?;

        let account = OpenAccount {
            file: user_dir.join(ACCOUNT_FILE),
            record: AccountRecord {
                username: username.to_string(),
                created_at: Utc::now(),
                settings,
                rpc_nodes: Vec::new(),
                premium: None,
                external_services: Vec::new(),
            },
        };
        account.persist()?;
        self.open = Some(account);
        Ok(())
    }

    fn populate_rpc_nodes(&mut self, nodes: &[RpcNode]) -> Result<(), DataHandlerError> {
        let account = self.account_mut()?;
        account.record.rpc_nodes = nodes.to_vec();
        account.persist()
    }

    fn set_premium(&mut self, credentials: &PremiumCredentials) -> Result<(), DataHandlerError> {
        let account = self.account_mut()?;
        account.record.premium = Some(credentials.clone());
        account.persist()
    }

    fn add_external_service_credentials(
        &mut self,
        credentials: &[ExternalServiceCredential],
    ) -> Result<(), DataHandlerError> {
        let account = self.account_mut()?;
        for credential in credentials {
            let services = &mut account.record.external_services;
            services.retain(|c| c.service != credential.service);
            services.push(credential.clone());
        }
        account.persist()
    }

    fn logout(&mut self) -> Result<(), DataHandlerError> {
        match self.open.take() {
            Some(_) => Ok(()),
            None => Err(DataHandlerError::NotLoggedIn),
        }
    }
}
