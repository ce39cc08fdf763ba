//! Benchmarking setup for pallet-ard-token
//!
//! Every balance-moving benchmark runs with a snapshot already issued and no
//! checkpoints recorded yet, so each call pays for its checkpoint writes.

use super::*;

#[allow(unused)]
use crate::Pallet as ArdToken;
use frame_benchmarking::v2::*;
use frame_system::RawOrigin;

const FUNDS: u128 = 10_000_000;
const AMOUNT: u128 = 1_000_000;

fn grant<T: Config>(role: RoleId, who: &T::AccountId) {
    Roles::<T>::insert(role, who, true);
}

fn fund<T: Config>(who: &T::AccountId, amount: u128) {
    Balances::<T>::mutate(who, |balance| *balance = balance.saturating_add(amount));
    TotalSupply::<T>::mutate(|supply| *supply = supply.saturating_add(amount));
}

fn snapshot_pending<T: Config>() {
    CurrentSnapshotId::<T>::mutate(|id| *id = id.saturating_add(1));
}

#[benchmarks]
mod benchmarks {
    use super::*;

    #[benchmark]
    fn mint() {
        let caller: T::AccountId = whitelisted_caller();
        let recipient: T::AccountId = account("recipient", 0, 0);
        grant::<T>(MINTER_ROLE, &caller);
        snapshot_pending::<T>();
        let supply = TotalSupply::<T>::get();

        #[extrinsic_call]
        _(RawOrigin::Signed(caller), recipient.clone(), AMOUNT);

        assert_eq!(Balances::<T>::get(&recipient), AMOUNT);
        assert_eq!(TotalSupply::<T>::get(), supply + AMOUNT);
    }

    #[benchmark]
    fn transfer() {
        let caller: T::AccountId = whitelisted_caller();
        let recipient: T::AccountId = account("recipient", 0, 0);
        fund::<T>(&caller, FUNDS);
        snapshot_pending::<T>();

        #[extrinsic_call]
        _(RawOrigin::Signed(caller.clone()), recipient.clone(), AMOUNT);

        assert_eq!(Balances::<T>::get(&recipient), AMOUNT);
        assert_eq!(CheckpointCount::<T>::get(Tracked::Balance(caller)), 1);
    }

    #[benchmark]
    fn transfer_from() {
        let caller: T::AccountId = whitelisted_caller();
        let owner: T::AccountId = account("owner", 0, 0);
        let recipient: T::AccountId = account("recipient", 0, 0);
        fund::<T>(&owner, FUNDS);
        Allowances::<T>::insert(&owner, &caller, FUNDS);
        snapshot_pending::<T>();

        #[extrinsic_call]
        _(RawOrigin::Signed(caller.clone()), owner.clone(), recipient.clone(), AMOUNT);

        assert_eq!(Balances::<T>::get(&recipient), AMOUNT);
        assert_eq!(Allowances::<T>::get(&owner, &caller), FUNDS - AMOUNT);
    }

    #[benchmark]
    fn approve() {
        let caller: T::AccountId = whitelisted_caller();
        let spender: T::AccountId = account("spender", 0, 0);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller.clone()), spender.clone(), AMOUNT);

        assert_eq!(Allowances::<T>::get(&caller, &spender), AMOUNT);
    }

    #[benchmark]
    fn increase_allowance() {
        let caller: T::AccountId = whitelisted_caller();
        let spender: T::AccountId = account("spender", 0, 0);
        Allowances::<T>::insert(&caller, &spender, AMOUNT);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller.clone()), spender.clone(), AMOUNT);

        assert_eq!(Allowances::<T>::get(&caller, &spender), 2 * AMOUNT);
    }

    #[benchmark]
    fn decrease_allowance() {
        let caller: T::AccountId = whitelisted_caller();
        let spender: T::AccountId = account("spender", 0, 0);
        Allowances::<T>::insert(&caller, &spender, 2 * AMOUNT);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller.clone()), spender.clone(), AMOUNT);

        assert_eq!(Allowances::<T>::get(&caller, &spender), AMOUNT);
    }

    #[benchmark]
    fn burn() {
        let caller: T::AccountId = whitelisted_caller();
        fund::<T>(&caller, FUNDS);
        snapshot_pending::<T>();

        #[extrinsic_call]
        _(RawOrigin::Signed(caller.clone()), AMOUNT);

        assert_eq!(Balances::<T>::get(&caller), FUNDS - AMOUNT);
    }

    #[benchmark]
    fn burn_from() {
        let caller: T::AccountId = whitelisted_caller();
        let owner: T::AccountId = account("owner", 0, 0);
        fund::<T>(&owner, FUNDS);
        Allowances::<T>::insert(&owner, &caller, FUNDS);
        snapshot_pending::<T>();

        #[extrinsic_call]
        _(RawOrigin::Signed(caller.clone()), owner.clone(), AMOUNT);

        assert_eq!(Balances::<T>::get(&owner), FUNDS - AMOUNT);
        assert_eq!(Allowances::<T>::get(&owner, &caller), FUNDS - AMOUNT);
    }

    #[benchmark]
    fn grant_role() {
        let caller: T::AccountId = whitelisted_caller();
        let account: T::AccountId = account("member", 0, 0);
        grant::<T>(DEFAULT_ADMIN_ROLE, &caller);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller), MINTER_ROLE, account.clone());

        assert!(Roles::<T>::get(MINTER_ROLE, &account));
    }

    #[benchmark]
    fn revoke_role() {
        let caller: T::AccountId = whitelisted_caller();
        let account: T::AccountId = account("member", 0, 0);
        grant::<T>(DEFAULT_ADMIN_ROLE, &caller);
        grant::<T>(MINTER_ROLE, &account);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller), MINTER_ROLE, account.clone());

        assert!(!Roles::<T>::get(MINTER_ROLE, &account));
    }

    #[benchmark]
    fn renounce_role() {
        let caller: T::AccountId = whitelisted_caller();
        grant::<T>(MINTER_ROLE, &caller);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller.clone()), MINTER_ROLE);

        assert!(!Roles::<T>::get(MINTER_ROLE, &caller));
    }

    #[benchmark]
    fn pause() {
        let caller: T::AccountId = whitelisted_caller();
        grant::<T>(PAUSER_ROLE, &caller);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller));

        assert!(IsPaused::<T>::get());
    }

    #[benchmark]
    fn unpause() {
        let caller: T::AccountId = whitelisted_caller();
        grant::<T>(PAUSER_ROLE, &caller);
        IsPaused::<T>::put(true);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller));

        assert!(!IsPaused::<T>::get());
    }

    #[benchmark]
    fn set_blacklisted() {
        let caller: T::AccountId = whitelisted_caller();
        let account: T::AccountId = account("suspect", 0, 0);
        grant::<T>(BLACKLIST_ROLE, &caller);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller), account.clone(), true);

        assert!(Blacklisted::<T>::get(&account));
    }

    #[benchmark]
    fn snapshot() {
        let caller: T::AccountId = whitelisted_caller();
        grant::<T>(SNAPSHOT_ROLE, &caller);
        let before = CurrentSnapshotId::<T>::get();

        #[extrinsic_call]
        _(RawOrigin::Signed(caller));

        assert_eq!(CurrentSnapshotId::<T>::get(), before + 1);
    }

    impl_benchmark_test_suite!(ArdToken, crate::mock::new_test_ext(), crate::mock::Test);
}
