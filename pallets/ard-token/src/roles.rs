//! Role identifiers and role-based access control.
//!
//! Roles are opaque 32-byte identifiers. Each operational role is the
//! keccak-256 digest of its name, so identifiers match the ones used by
//! EVM deployments of the same token. Membership lives in the [`Roles`]
//! double map keyed by `(role, account)`.
//!
//! Holders of [`DEFAULT_ADMIN_ROLE`] administer every role. A holder of any
//! other role may also grant or revoke that same role.

use frame_support::{dispatch::DispatchResult, ensure};
use sp_core::hexdisplay::HexDisplay;

use crate::{Config, Error, Event, Pallet, Roles, LOG_TARGET};

/// Opaque role identifier.
pub type RoleId = [u8; 32];

/// Super-admin role. Its holders may grant and revoke any role.
pub const DEFAULT_ADMIN_ROLE: RoleId = [0u8; 32];

/// `keccak256("MINTER_ROLE")`
pub const MINTER_ROLE: RoleId = [
    0x9f, 0x2d, 0xf0, 0xfe, 0xd2, 0xc7, 0x76, 0x48, 0xde, 0x58, 0x60, 0xa4, 0xcc, 0x50, 0x8c, 0xd0,
    0x81, 0x8c, 0x85, 0xb8, 0xb8, 0xa1, 0xab, 0x4c, 0xee, 0xef, 0x8d, 0x98, 0x1c, 0x89, 0x56, 0xa6,
];

/// `keccak256("PAUSER_ROLE")`
pub const PAUSER_ROLE: RoleId = [
    0x65, 0xd7, 0xa2, 0x8e, 0x32, 0x65, 0xb3, 0x7a, 0x64, 0x74, 0x92, 0x9f, 0x33, 0x65, 0x21, 0xb3,
    0x32, 0xc1, 0x68, 0x1b, 0x93, 0x3f, 0x6c, 0xb9, 0xf3, 0x37, 0x66, 0x73, 0x44, 0x0d, 0x86, 0x2a,
];

/// `keccak256("BLACKLIST_ROLE")`
pub const BLACKLIST_ROLE: RoleId = [
    0x22, 0x43, 0x5e, 0xd0, 0x27, 0xed, 0xf5, 0xf9, 0x02, 0xdc, 0x00, 0x93, 0xfb, 0xc2, 0x4c, 0xdb,
    0x50, 0xc0, 0x5b, 0x5f, 0xd5, 0xf3, 0x11, 0xb7, 0x8c, 0x67, 0xc1, 0xcb, 0xaf, 0xf6, 0x0e, 0x13,
];

/// `keccak256("SNAPSHOT_ROLE")`
pub const SNAPSHOT_ROLE: RoleId = [
    0x5f, 0xdb, 0xd3, 0x5e, 0x8d, 0xa8, 0x3e, 0xe7, 0x55, 0xd5, 0xe6, 0x2a, 0x53, 0x9e, 0x5e, 0xd7,
    0xf4, 0x71, 0x26, 0xab, 0xed, 0xe0, 0xb8, 0xb1, 0x0f, 0x9e, 0xa4, 0x3d, 0xc6, 0xee, 0xd0, 0x7f,
];

/// Roles handed to the deployer alongside [`DEFAULT_ADMIN_ROLE`].
pub const OPERATIONAL_ROLES: [RoleId; 4] = [MINTER_ROLE, PAUSER_ROLE, BLACKLIST_ROLE, SNAPSHOT_ROLE];

impl<T: Config> Pallet<T> {
    /// Whether `account` holds `role`.
    pub fn has_role(role: RoleId, account: &T::AccountId) -> bool {
        Roles::<T>::get(role, account)
    }

    /// Fails with [`Error::Unauthorized`] unless `who` holds `role`.
    pub fn ensure_role(role: RoleId, who: &T::AccountId) -> DispatchResult {
        if !Self::has_role(role, who) {
            log::debug!(
                target: LOG_TARGET,
                "account {:?} is missing role {}",
                who,
                HexDisplay::from(&role)
            );
            return Err(Error::<T>::Unauthorized.into());
        }
        Ok(())
    }

    /// Fails with [`Error::Unauthorized`] unless `who` may administer `role`.
    pub(crate) fn ensure_role_admin(role: RoleId, who: &T::AccountId) -> DispatchResult {
        if Self::has_role(DEFAULT_ADMIN_ROLE, who) {
            return Ok(());
        }
        Self::ensure_role(role, who)
    }

    /// Grants `role` to `account` on behalf of `sender`.
    pub(crate) fn do_grant_role(
        role: RoleId,
        account: T::AccountId,
        sender: T::AccountId,
    ) -> DispatchResult {
        ensure!(account != Self::zero_account(), Error::<T>::InvalidArgument);
        Self::ensure_role_admin(role, &sender)?;
        if Self::has_role(role, &account) {
            return Ok(());
        }

        Roles::<T>::insert(role, &account, true);
        log::debug!(target: LOG_TARGET, "granted role {} to {:?}", HexDisplay::from(&role), account);
        Self::deposit_event(Event::RoleGranted { role, account, sender });
        Ok(())
    }

    /// Revokes `role` from `account` on behalf of `sender`.
    pub(crate) fn do_revoke_role(
        role: RoleId,
        account: T::AccountId,
        sender: T::AccountId,
    ) -> DispatchResult {
        Self::ensure_role_admin(role, &sender)?;
        Self::remove_role(role, account, sender);
        Ok(())
    }

    /// Drops the membership without an admin check. No event if absent.
    pub(crate) fn remove_role(role: RoleId, account: T::AccountId, sender: T::AccountId) {
        if !Self::has_role(role, &account) {
            return;
        }

        Roles::<T>::remove(role, &account);
        log::debug!(target: LOG_TARGET, "revoked role {} from {:?}", HexDisplay::from(&role), account);
        Self::deposit_event(Event::RoleRevoked { role, account, sender });
    }
}
