//! Storage migrations for pallet-ard-token.
//!
//! Chains that include the pallet from genesis start at `STORAGE_VERSION` and
//! have nothing to migrate. Chains that add it through a runtime upgrade
//! start at version 0 with empty storage and no administrator, so the v1
//! migration bootstraps the role table.
//!
//! # Wiring Migrations in Runtime
//!
//! ```ignore
//! parameter_types! {
//!     pub TokenAdmin: AccountId = /* governance or treasury account */;
//! }
//!
//! pub type Executive = frame_executive::Executive<
//!     Runtime,
//!     Block,
//!     frame_system::ChainContext<Runtime>,
//!     Runtime,
//!     AllPalletsWithSystem,
//!     pallet_ard_token::migrations::v1::InitializeRoles<Runtime, TokenAdmin>,
//! >;
//! ```
//!
//! # Guidelines
//!
//! - Migrate sequentially (v1 → v2 → v3) and check the on-chain version first
//! - Return the weight of the storage accesses actually performed
//! - Log progress with `log::info!` under the pallet's target

use frame_support::{pallet_prelude::*, traits::OnRuntimeUpgrade};
use sp_std::marker::PhantomData;

use crate::{Config, Pallet, Roles, DEFAULT_ADMIN_ROLE, LOG_TARGET, OPERATIONAL_ROLES};

/// Migration to version 1 (initial release).
pub mod v1 {
    use super::*;

    /// Grants the super-admin role and every operational role to `Admin`
    /// unless some account already holds the super-admin role, then sets the
    /// storage version to 1.
    pub struct InitializeRoles<T, Admin>(PhantomData<(T, Admin)>);

    impl<T: Config, Admin: Get<T::AccountId>> OnRuntimeUpgrade for InitializeRoles<T, Admin> {
        fn on_runtime_upgrade() -> Weight {
            let on_chain_version = Pallet::<T>::on_chain_storage_version();

            if on_chain_version >= 1 {
                log::info!(
                    target: LOG_TARGET,
                    "Storage already at v{on_chain_version:?}, skipping v1 migration"
                );
                return T::DbWeight::get().reads(1);
            }

            let mut writes = 1u64;
            if Roles::<T>::iter_prefix_values(DEFAULT_ADMIN_ROLE).next().is_none() {
                let admin = Admin::get();
                Roles::<T>::insert(DEFAULT_ADMIN_ROLE, &admin, true);
                for role in OPERATIONAL_ROLES {
                    Roles::<T>::insert(role, &admin, true);
                }
                writes += 1 + OPERATIONAL_ROLES.len() as u64;
                log::info!(target: LOG_TARGET, "Migration v0 → v1: granted all roles to {:?}", admin);
            } else {
                log::info!(target: LOG_TARGET, "Migration v0 → v1: administrator already present");
            }

            StorageVersion::new(1).put::<Pallet<T>>();
            T::DbWeight::get().reads_writes(2, writes)
        }

        #[cfg(feature = "try-runtime")]
        fn pre_upgrade() -> Result<sp_std::vec::Vec<u8>, sp_runtime::TryRuntimeError> {
            let on_chain_version = Pallet::<T>::on_chain_storage_version();
            log::info!(
                target: LOG_TARGET,
                "Pre-upgrade: on-chain storage version is {:?}",
                on_chain_version
            );
            Ok(on_chain_version.encode())
        }

        #[cfg(feature = "try-runtime")]
        fn post_upgrade(state: sp_std::vec::Vec<u8>) -> Result<(), sp_runtime::TryRuntimeError> {
            let pre_version: u16 = Decode::decode(&mut &state[..])
                .map_err(|_| sp_runtime::TryRuntimeError::Other("Failed to decode pre-state"))?;
            let post_version = Pallet::<T>::on_chain_storage_version();

            if pre_version < 1 {
                frame_support::ensure!(
                    post_version >= 1,
                    sp_runtime::TryRuntimeError::Other("Migration to v1 did not complete")
                );
                frame_support::ensure!(
                    Roles::<T>::iter_prefix_values(DEFAULT_ADMIN_ROLE).next().is_some(),
                    sp_runtime::TryRuntimeError::Other("No administrator after v1 migration")
                );
            }

            Ok(())
        }
    }
}
