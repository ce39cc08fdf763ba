//! Fungible token ledger guarded by four gates: role-based access control,
//! a global pause switch, a per-account blacklist and point-in-time balance
//! snapshots.
//!
//! Every balance mutation goes through the same path:
//! argument checks, pause, blacklist (sender then receiver), role,
//! allowance, balance, then checkpoint recording and the write itself. All
//! checks complete before the first storage write.

#![cfg_attr(not(feature = "std"), no_std)]

use frame_support::{dispatch::DispatchResult, ensure, pallet_prelude::*};
use frame_system::{ensure_signed, pallet_prelude::*};
use sp_runtime::traits::TrailingZeroInput;
use sp_std::prelude::*;

pub use pallet::*;

pub mod checkpoints;
pub mod migrations;
pub mod roles;
pub mod weights;

pub use checkpoints::{Checkpoint, SnapshotId, Tracked};
pub use roles::{
    RoleId, BLACKLIST_ROLE, DEFAULT_ADMIN_ROLE, MINTER_ROLE, OPERATIONAL_ROLES, PAUSER_ROLE,
    SNAPSHOT_ROLE,
};
pub use weights::WeightInfo;

#[cfg(test)]
mod mock;



#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

pub(crate) const LOG_TARGET: &str = "pallet-ard-token";

/// The current storage version.
const STORAGE_VERSION: StorageVersion = StorageVersion::new(1);

/// Allowance value that is never decremented when spent.
pub const UNLIMITED_ALLOWANCE: u128 = u128::MAX;

#[frame_support::pallet]
pub mod pallet {
    use super::*;

    #[pallet::config]
    pub trait Config: frame_system::Config {
        type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;
        type WeightInfo: WeightInfo;
    }

    #[pallet::pallet]
    #[pallet::storage_version(STORAGE_VERSION)]
    pub struct Pallet<T>(_);

    /// Token name (e.g., "ArdCoin")
    #[pallet::storage]
    pub type TokenName<T> = StorageValue<_, BoundedVec<u8, ConstU32<64>>, ValueQuery>;

    /// Token symbol (e.g., "ARDX")
    #[pallet::storage]
    pub type TokenSymbol<T> = StorageValue<_, BoundedVec<u8, ConstU32<16>>, ValueQuery>;

    /// Number of fractional digits of one whole token
    #[pallet::storage]
    pub type Decimals<T> = StorageValue<_, u8, ValueQuery>;

    /// Total token supply
    #[pallet::storage]
    pub type TotalSupply<T> = StorageValue<_, u128, ValueQuery>;

    /// Account balances
    #[pallet::storage]
    pub type Balances<T: Config> = StorageMap<_, Blake2_128Concat, T::AccountId, u128, ValueQuery>;

    /// Spending allowances, keyed by (owner, spender)
    #[pallet::storage]
    pub type Allowances<T: Config> = StorageDoubleMap<
        _,
        Blake2_128Concat,
        T::AccountId,
        Blake2_128Concat,
        T::AccountId,
        u128,
        ValueQuery,
    >;

    /// Role membership, keyed by (role, account)
    #[pallet::storage]
    pub type Roles<T: Config> =
        StorageDoubleMap<_, Blake2_128Concat, RoleId, Blake2_128Concat, T::AccountId, bool, ValueQuery>;

    /// Blacklisted accounts (cannot send or receive)
    #[pallet::storage]
    pub type Blacklisted<T: Config> = StorageMap<_, Blake2_128Concat, T::AccountId, bool, ValueQuery>;

    /// Global pause flag for balance mutations
    #[pallet::storage]
    pub type IsPaused<T> = StorageValue<_, bool, ValueQuery>;

    /// Id of the latest snapshot; 0 before the first one
    #[pallet::storage]
    pub type CurrentSnapshotId<T> = StorageValue<_, SnapshotId, ValueQuery>;

    /// Length of each checkpoint sequence
    #[pallet::storage]
    pub type CheckpointCount<T: Config> =
        StorageMap<_, Blake2_128Concat, Tracked<T::AccountId>, u32, ValueQuery>;

    /// Checkpoint sequences, keyed by (tracked value, index)
    #[pallet::storage]
    pub type Checkpoints<T: Config> = StorageDoubleMap<
        _,
        Blake2_128Concat,
        Tracked<T::AccountId>,
        Twox64Concat,
        u32,
        Checkpoint,
        OptionQuery,
    >;

    #[pallet::event]
    #[pallet::generate_deposit(pub(super) fn deposit_event)]
    pub enum Event<T: Config> {
        /// New tokens minted
        Minted { to: T::AccountId, amount: u128 },
        /// Tokens destroyed
        Burned { from: T::AccountId, amount: u128 },
        /// Tokens transferred from one account to another
        Transferred { from: T::AccountId, to: T::AccountId, amount: u128 },
        /// Allowance of `spender` over `owner`'s tokens set to `amount`
        Approval { owner: T::AccountId, spender: T::AccountId, amount: u128 },
        /// Role granted to an account
        RoleGranted { role: RoleId, account: T::AccountId, sender: T::AccountId },
        /// Role removed from an account
        RoleRevoked { role: RoleId, account: T::AccountId, sender: T::AccountId },
        /// Balance mutations halted
        Paused { account: T::AccountId },
        /// Balance mutations resumed
        Unpaused { account: T::AccountId },
        /// Blacklist flag of an account changed
        BlacklistUpdated { account: T::AccountId, blacklisted: bool },
        /// New snapshot id issued
        SnapshotTaken { id: SnapshotId },
    }

    #[pallet::error]
    pub enum Error<T> {
        /// Caller lacks the role required for this call
        Unauthorized,
        /// Balance mutations are paused
        Paused,
        /// Pause requested while already paused
        AlreadyPaused,
        /// Unpause requested while not paused
        AlreadyUnpaused,
        /// Sending account is blacklisted
        BlacklistedSender,
        /// Receiving account is blacklisted
        BlacklistedReceiver,
        /// Account balance is lower than the amount
        InsufficientBalance,
        /// Spender allowance is lower than the amount
        InsufficientAllowance,
        /// Snapshot id is zero or has not been issued yet
        SnapshotIdNotYetTaken,
        /// Zero account passed where a real account is required
        InvalidArgument,
        /// Arithmetic overflow of the supply, an allowance or the snapshot id
        Overflow,
    }

    #[pallet::hooks]
    impl<T: Config> Hooks<BlockNumberFor<T>> for Pallet<T> {
        #[cfg(feature = "try-runtime")]
        fn try_state(_n: BlockNumberFor<T>) -> Result<(), sp_runtime::TryRuntimeError> {
            Self::do_try_state()
        }
    }

    #[pallet::call]
    impl<T: Config> Pallet<T> {
        #[pallet::call_index(0)]
        #[pallet::weight(T::WeightInfo::mint())]
        pub fn mint(origin: OriginFor<T>, to: T::AccountId, amount: u128) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::do_mint(&who, to, amount)
        }

        #[pallet::call_index(1)]
        #[pallet::weight(T::WeightInfo::transfer())]
        pub fn transfer(origin: OriginFor<T>, to: T::AccountId, amount: u128) -> DispatchResult {
            let sender = ensure_signed(origin)?;
            Self::do_transfer(None, sender, to, amount)
        }

        #[pallet::call_index(2)]
        #[pallet::weight(T::WeightInfo::transfer_from())]
        pub fn transfer_from(
            origin: OriginFor<T>,
            from: T::AccountId,
            to: T::AccountId,
            amount: u128,
        ) -> DispatchResult {
            let spender = ensure_signed(origin)?;
            Self::do_transfer(Some(spender), from, to, amount)
        }

        /// Sets the caller's allowance for `spender` to exactly `amount`.
        #[pallet::call_index(3)]
        #[pallet::weight(T::WeightInfo::approve())]
        pub fn approve(origin: OriginFor<T>, spender: T::AccountId, amount: u128) -> DispatchResult {
            let owner = ensure_signed(origin)?;
            Self::do_approve(owner, spender, amount)
        }

        #[pallet::call_index(4)]
        #[pallet::weight(T::WeightInfo::increase_allowance())]
        pub fn increase_allowance(
            origin: OriginFor<T>,
            spender: T::AccountId,
            added: u128,
        ) -> DispatchResult {
            let owner = ensure_signed(origin)?;
            let amount = Allowances::<T>::get(&owner, &spender)
                .checked_add(added)
                .ok_or(Error::<T>::Overflow)?;
            Self::do_approve(owner, spender, amount)
        }

        #[pallet::call_index(5)]
        #[pallet::weight(T::WeightInfo::decrease_allowance())]
        pub fn decrease_allowance(
            origin: OriginFor<T>,
            spender: T::AccountId,
            subtracted: u128,
        ) -> DispatchResult {
            let owner = ensure_signed(origin)?;
            let amount = Allowances::<T>::get(&owner, &spender)
                .checked_sub(subtracted)
                .ok_or(Error::<T>::InsufficientAllowance)?;
            Self::do_approve(owner, spender, amount)
        }

        #[pallet::call_index(6)]
        #[pallet::weight(T::WeightInfo::burn())]
        pub fn burn(origin: OriginFor<T>, amount: u128) -> DispatchResult {
            let owner = ensure_signed(origin)?;
            Self::do_burn(None, owner, amount)
        }

        #[pallet::call_index(7)]
        #[pallet::weight(T::WeightInfo::burn_from())]
        pub fn burn_from(origin: OriginFor<T>, owner: T::AccountId, amount: u128) -> DispatchResult {
            let spender = ensure_signed(origin)?;
            Self::do_burn(Some(spender), owner, amount)
        }

        #[pallet::call_index(8)]
        #[pallet::weight(T::WeightInfo::grant_role())]
        pub fn grant_role(
            origin: OriginFor<T>,
            role: RoleId,
            account: T::AccountId,
        ) -> DispatchResult {
            let sender = ensure_signed(origin)?;
            Self::do_grant_role(role, account, sender)
        }

        #[pallet::call_index(9)]
        #[pallet::weight(T::WeightInfo::revoke_role())]
        pub fn revoke_role(
            origin: OriginFor<T>,
            role: RoleId,
            account: T::AccountId,
        ) -> DispatchResult {
            let sender = ensure_signed(origin)?;
            Self::do_revoke_role(role, account, sender)
        }

        /// Drops the caller's own membership of `role`.
        #[pallet::call_index(10)]
        #[pallet::weight(T::WeightInfo::renounce_role())]
        pub fn renounce_role(origin: OriginFor<T>, role: RoleId) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::remove_role(role, who.clone(), who);
            Ok(())
        }

        #[pallet::call_index(11)]
        #[pallet::weight(T::WeightInfo::pause())]
        pub fn pause(origin: OriginFor<T>) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_role(PAUSER_ROLE, &who)?;
            ensure!(!IsPaused::<T>::get(), Error::<T>::AlreadyPaused);

            IsPaused::<T>::put(true);
            log::debug!(target: LOG_TARGET, "paused by {:?}", who);
            Self::deposit_event(Event::Paused { account: who });
            Ok(())
        }

        #[pallet::call_index(12)]
        #[pallet::weight(T::WeightInfo::unpause())]
        pub fn unpause(origin: OriginFor<T>) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_role(PAUSER_ROLE, &who)?;
            ensure!(IsPaused::<T>::get(), Error::<T>::AlreadyUnpaused);

            IsPaused::<T>::put(false);
            log::debug!(target: LOG_TARGET, "unpaused by {:?}", who);
            Self::deposit_event(Event::Unpaused { account: who });
            Ok(())
        }

        /// Sets or clears the blacklist flag of `account`. Balances are untouched.
        #[pallet::call_index(13)]
        #[pallet::weight(T::WeightInfo::set_blacklisted())]
        pub fn set_blacklisted(
            origin: OriginFor<T>,
            account: T::AccountId,
            blacklisted: bool,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_role(BLACKLIST_ROLE, &who)?;

            if blacklisted {
                Blacklisted::<T>::insert(&account, true);
            } else {
                Blacklisted::<T>::remove(&account);
            }
            log::debug!(target: LOG_TARGET, "blacklist flag of {:?} set to {}", account, blacklisted);
            Self::deposit_event(Event::BlacklistUpdated { account, blacklisted });
            Ok(())
        }

        #[pallet::call_index(14)]
        #[pallet::weight(T::WeightInfo::snapshot())]
        pub fn snapshot(origin: OriginFor<T>) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::do_snapshot(&who).map(|_| ())
        }
    }

    #[pallet::genesis_config]
    #[derive(frame_support::DefaultNoBound)]
    pub struct GenesisConfig<T: Config> {
        /// Deployer account; receives the admin role and every operational role
        pub admin: Option<T::AccountId>,
        /// Token name
        pub token_name: Vec<u8>,
        /// Token symbol
        pub token_symbol: Vec<u8>,
        /// Token decimals
        pub decimals: u8,
        /// Additional role assignments
        pub role_members: Vec<(RoleId, T::AccountId)>,
        /// Accounts blacklisted at genesis
        pub blacklisted_accounts: Vec<T::AccountId>,
        /// Initial token mints (account, amount)
        pub initial_balances: Vec<(T::AccountId, u128)>,
    }

    #[pallet::genesis_build]
    impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
        fn build(&self) {
            let name: BoundedVec<u8, ConstU32<64>> =
                self.token_name.clone().try_into().expect("Token name too long (max 64 bytes)");
            TokenName::<T>::put(name);

            let symbol: BoundedVec<u8, ConstU32<16>> =
                self.token_symbol.clone().try_into().expect("Token symbol too long (max 16 bytes)");
            TokenSymbol::<T>::put(symbol);

            Decimals::<T>::put(self.decimals);

            if let Some(ref admin) = self.admin {
                Roles::<T>::insert(DEFAULT_ADMIN_ROLE, admin, true);
                for role in OPERATIONAL_ROLES {
                    Roles::<T>::insert(role, admin, true);
                }
            }

            for (role, account) in &self.role_members {
                Roles::<T>::insert(role, account, true);
            }

            for account in &self.blacklisted_accounts {
                Blacklisted::<T>::insert(account, true);
            }

            // No snapshot exists yet, so no checkpoints are written here
            let mut total: u128 = 0;
            for (account, amount) in &self.initial_balances {
                Balances::<T>::mutate(account, |balance| *balance = balance.saturating_add(*amount));
                total = total.checked_add(*amount).expect("Initial balances overflow u128");
            }
            TotalSupply::<T>::put(total);
        }
    }
}

// Queries
impl<T: Config> Pallet<T> {
    pub fn token_name() -> Vec<u8> {
        TokenName::<T>::get().into_inner()
    }

    pub fn token_symbol() -> Vec<u8> {
        TokenSymbol::<T>::get().into_inner()
    }

    pub fn decimals() -> u8 {
        Decimals::<T>::get()
    }

    pub fn total_supply() -> u128 {
        TotalSupply::<T>::get()
    }

    pub fn balance_of(account: &T::AccountId) -> u128 {
        Balances::<T>::get(account)
    }

    pub fn allowance(owner: &T::AccountId, spender: &T::AccountId) -> u128 {
        Allowances::<T>::get(owner, spender)
    }

    pub fn is_blacklisted(account: &T::AccountId) -> bool {
        Blacklisted::<T>::get(account)
    }

    pub fn is_paused() -> bool {
        IsPaused::<T>::get()
    }

    pub fn current_snapshot_id() -> SnapshotId {
        CurrentSnapshotId::<T>::get()
    }

    /// Balance of `account` at the time `snapshot_id` was taken.
    pub fn balance_of_at(
        account: &T::AccountId,
        snapshot_id: SnapshotId,
    ) -> Result<u128, DispatchError> {
        Self::value_at(&Tracked::Balance(account.clone()), snapshot_id)
    }

    /// Total supply at the time `snapshot_id` was taken.
    pub fn total_supply_at(snapshot_id: SnapshotId) -> Result<u128, DispatchError> {
        Self::value_at(&Tracked::TotalSupply, snapshot_id)
    }
}

// Mutation path
impl<T: Config> Pallet<T> {
    /// The all-zero account, rejected wherever a real account is expected.
    pub(crate) fn zero_account() -> T::AccountId {
        T::AccountId::decode(&mut TrailingZeroInput::zeroes())
            .expect("infinite length input; no invalid inputs for type; qed")
    }

    fn ensure_not_paused() -> DispatchResult {
        ensure!(!IsPaused::<T>::get(), Error::<T>::Paused);
        Ok(())
    }

    fn ensure_can_send(account: &T::AccountId) -> DispatchResult {
        ensure!(!Blacklisted::<T>::get(account), Error::<T>::BlacklistedSender);
        Ok(())
    }

    fn ensure_can_receive(account: &T::AccountId) -> DispatchResult {
        ensure!(!Blacklisted::<T>::get(account), Error::<T>::BlacklistedReceiver);
        Ok(())
    }

    /// Allowance left after `spender` spends `amount` of `owner`'s tokens.
    /// `None` for an unlimited allowance, which stays untouched.
    fn checked_spend(
        owner: &T::AccountId,
        spender: &T::AccountId,
        amount: u128,
    ) -> Result<Option<u128>, DispatchError> {
        let current = Allowances::<T>::get(owner, spender);
        if current == UNLIMITED_ALLOWANCE {
            return Ok(None);
        }
        let remaining = current.checked_sub(amount).ok_or(Error::<T>::InsufficientAllowance)?;
        Ok(Some(remaining))
    }

    fn apply_spend(owner: &T::AccountId, spender: T::AccountId, remaining: Option<u128>) {
        if let Some(amount) = remaining {
            Allowances::<T>::insert(owner, &spender, amount);
            Self::deposit_event(Event::Approval { owner: owner.clone(), spender, amount });
        }
    }

    pub(crate) fn do_mint(who: &T::AccountId, to: T::AccountId, amount: u128) -> DispatchResult {
        ensure!(to != Self::zero_account(), Error::<T>::InvalidArgument);
        Self::ensure_not_paused()?;
        Self::ensure_can_receive(&to)?;
        Self::ensure_role(MINTER_ROLE, who)?;
        let supply = TotalSupply::<T>::get().checked_add(amount).ok_or(Error::<T>::Overflow)?;

        if amount > 0 {
            Self::record_checkpoint(&Tracked::Balance(to.clone()));
            Self::record_checkpoint(&Tracked::TotalSupply);
        }
        TotalSupply::<T>::put(supply);
        // Cannot saturate: every balance is bounded by the total supply
        Balances::<T>::mutate(&to, |balance| *balance = balance.saturating_add(amount));

        Self::deposit_event(Event::Minted { to, amount });
        Ok(())
    }

    /// Moves `amount` from `from` to `to`, spending `spender`'s allowance when
    /// acting on behalf of `from`.
    pub(crate) fn do_transfer(
        spender: Option<T::AccountId>,
        from: T::AccountId,
        to: T::AccountId,
        amount: u128,
    ) -> DispatchResult {
        ensure!(to != Self::zero_account(), Error::<T>::InvalidArgument);
        Self::ensure_not_paused()?;
        Self::ensure_can_send(&from)?;
        Self::ensure_can_receive(&to)?;
        let spend = spender
            .map(|spender| Self::checked_spend(&from, &spender, amount).map(|left| (spender, left)))
            .transpose()?;
        let from_balance = Balances::<T>::get(&from);
        ensure!(from_balance >= amount, Error::<T>::InsufficientBalance);

        if let Some((spender, remaining)) = spend {
            Self::apply_spend(&from, spender, remaining);
        }
        // Self-transfers and zero amounts leave both balances unchanged
        if amount > 0 && from != to {
            Self::record_checkpoint(&Tracked::Balance(from.clone()));
            Self::record_checkpoint(&Tracked::Balance(to.clone()));
        }
        Balances::<T>::insert(&from, from_balance - amount);
        Balances::<T>::mutate(&to, |balance| *balance = balance.saturating_add(amount));

        Self::deposit_event(Event::Transferred { from, to, amount });
        Ok(())
    }

    /// Destroys `amount` of `owner`'s tokens, spending `spender`'s allowance
    /// when acting on behalf of `owner`.
    pub(crate) fn do_burn(
        spender: Option<T::AccountId>,
        owner: T::AccountId,
        amount: u128,
    ) -> DispatchResult {
        Self::ensure_not_paused()?;
        Self::ensure_can_send(&owner)?;
        let spend = spender
            .map(|spender| Self::checked_spend(&owner, &spender, amount).map(|left| (spender, left)))
            .transpose()?;
        let balance = Balances::<T>::get(&owner);
        ensure!(balance >= amount, Error::<T>::InsufficientBalance);

        if let Some((spender, remaining)) = spend {
            Self::apply_spend(&owner, spender, remaining);
        }
        if amount > 0 {
            Self::record_checkpoint(&Tracked::Balance(owner.clone()));
            Self::record_checkpoint(&Tracked::TotalSupply);
        }
        Balances::<T>::insert(&owner, balance - amount);
        TotalSupply::<T>::mutate(|supply| *supply = supply.saturating_sub(amount));

        Self::deposit_event(Event::Burned { from: owner, amount });
        Ok(())
    }

    pub(crate) fn do_approve(
        owner: T::AccountId,
        spender: T::AccountId,
        amount: u128,
    ) -> DispatchResult {
        ensure!(spender != Self::zero_account(), Error::<T>::InvalidArgument);
        Allowances::<T>::insert(&owner, &spender, amount);
        Self::deposit_event(Event::Approval { owner, spender, amount });
        Ok(())
    }

    /// Issues the next snapshot id. Checkpoints are written lazily by the
    /// next mutation of each tracked value.
    pub fn do_snapshot(who: &T::AccountId) -> Result<SnapshotId, DispatchError> {
        Self::ensure_role(SNAPSHOT_ROLE, who)?;
        let id = CurrentSnapshotId::<T>::get().checked_add(1).ok_or(Error::<T>::Overflow)?;

        CurrentSnapshotId::<T>::put(id);
        log::debug!(target: LOG_TARGET, "snapshot {} taken by {:?}", id, who);
        Self::deposit_event(Event::SnapshotTaken { id });
        Ok(id)
    }
}

#[cfg(any(feature = "try-runtime", test))]
impl<T: Config> Pallet<T> {
    /// Checks the ledger invariants over the whole state.
    pub fn do_try_state() -> Result<(), DispatchError> {
        let sum = Balances::<T>::iter_values().fold(0u128, |acc, balance| acc.saturating_add(balance));
        ensure!(sum == TotalSupply::<T>::get(), "Sum of balances differs from total supply");

        let current = CurrentSnapshotId::<T>::get();
        for (tracked, len) in CheckpointCount::<T>::iter() {
            let history = Self::checkpoint_history(&tracked);
            ensure!(history.len() == len as usize, "Checkpoint count does not match entries");
            ensure!(
                history.windows(2).all(|pair| pair[0].snapshot_id < pair[1].snapshot_id),
                "Checkpoint ids are not strictly increasing"
            );
            ensure!(
                history.iter().all(|checkpoint| checkpoint.snapshot_id <= current),
                "Checkpoint recorded for a snapshot not yet taken"
            );
        }
        Ok(())
    }
}
