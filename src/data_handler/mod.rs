//! Account storage collaborator.
//!
//! The tool never touches account databases itself: it asks a
//! [`DataHandler`] to create the account and store settings and credentials.
//! The binary uses [`local::LocalDataHandler`]; tests plug in recorders.
//!
//! An unlocked account is represented by [`AccountSession`], which logs the
//! handler out when it goes out of scope unless [`AccountSession::close`] was
//! already called.

pub mod local;
pub mod nodes;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    credentials::{ExternalServiceCredential, PremiumCredentials},
    ui::StageDetail,
};

pub use nodes::{RpcNode, default_rpc_nodes};

#[derive(Error, Debug)]
pub enum DataHandlerError {
    #[error("user {0} already exists")]
    UserExists(String),

    #[error("invalid username {0:?}")]
    InvalidUsername(String),

    #[error("no account is logged in")]
    NotLoggedIn,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("account file serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Settings a freshly created account starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifiableSettings {
    pub premium_should_sync: bool,
    pub submit_usage_analytics: bool,
}

impl ModifiableSettings {
    /// Development accounts never sync premium data or phone home.
    pub const fn development() -> Self {
        Self {
            premium_should_sync: false,
            submit_usage_analytics: false,
        }
    }
}

pub trait DataHandler {
    /// Create `username` and leave it logged in.
    fn create_account(
        &mut self,
        username: &str,
        password: &str,
        settings: ModifiableSettings,
    ) -> Result<(), DataHandlerError>;

    fn populate_rpc_nodes(&mut self, nodes: &[RpcNode]) -> Result<(), DataHandlerError>;

    fn set_premium(&mut self, credentials: &PremiumCredentials) -> Result<(), DataHandlerError>;

    fn add_external_service_credentials(
        &mut self,
        credentials: &[ExternalServiceCredential],
    ) -> Result<(), DataHandlerError>;

    fn logout(&mut self) -> Result<(), DataHandlerError>;
}

// ─── Session guard ────────────────────────────────────────────────────────────

/// A logged-in account.  Dropping it without calling [`close`](Self::close)
/// still logs out; a logout failure on that path is only logged.
pub struct AccountSession<'h, H: DataHandler> {
    handler: &'h mut H,
    open: bool,
}

impl<'h, H: DataHandler> AccountSession<'h, H> {
    pub fn create(
        handler: &'h mut H,
        username: &str,
        password: &str,
        settings: ModifiableSettings,
    ) -> Result<Self, DataHandlerError> {
        handler.create_account(username, password, settings)?;
        Ok(Self {
            handler,
            open: true,
        })
    }

    pub fn populate_rpc_nodes(&mut self, nodes: &[RpcNode]) -> Result<(), DataHandlerError> {
        self.handler.populate_rpc_nodes(nodes)
    }

    pub fn set_premium(&mut self, credentials: &PremiumCredentials) -> Result<(), DataHandlerError> {
        self.handler.set_premium(credentials)
    }

    pub fn add_external_service_credentials(
        &mut self,
        credentials: &[ExternalServiceCredential],
    ) -> Result<(), DataHandlerError> {
        self.handler.add_external_service_credentials(credentials)
    }

    /// Log out and report the result.
    pub fn close(mut self) -> Result<(), DataHandlerError> {
        self.open = false;
        self.handler.logout()
    }
}

impl<H: DataHandler> StageDetail for AccountSession<'_, H> {}

impl<H: DataHandler> Drop for AccountSession<'_, H> {
    fn drop(&mut self) {
        if self.open {
            if let Err(e) = self.handler.logout() {
                tracing::warn!("logout after failed setup did not complete: {e}");
            }
        }
    }
}
