//! Subcommand handlers.
//!
//! Each file in this module corresponds to one user-facing command:
//!
//! | File             | Invocation                  | Description                              |
//! |------------------|-----------------------------|------------------------------------------|
//! | `backup.rs`      | `rotki-devtool backup`      | Zip the whole data directory             |
//! | `restore.rs`     | `rotki-devtool restore`     | Replace a data directory with an archive |
//! | `new_user.rs`    | `rotki-devtool new-user`    | Create and seed a development account    |
//! | `sync_user.rs`   | `rotki-devtool sync-user`   | Copy a production user into development  |
//! | `zip_account.rs` | `rotki-devtool zip-account` | Zip a single user's directory            |

pub mod backup;
pub mod new_user;
pub mod restore;
pub mod sync_user;
pub mod zip_account;
