//! # Boundary Traits
//!
//! The OS queries the access diagnostic depends on, kept behind traits so
//! the walk can run against the real system or an in-memory fixture.
//!
//! | Trait | Queries |
//! |-------|---------|
//! | [`FileStat`] | `exists`, `kind`, `stat_permissions`, `stat_owner` |
//! | [`Identity`] | `current_user`, `group_members` |
//!
//! [`NativeFs`](crate::NativeFs) and [`NativeIdentity`](crate::NativeIdentity)
//! implement them against the running system.

mod file_stat;
mod identity;

pub use file_stat::FileStat;
pub use identity::Identity;
