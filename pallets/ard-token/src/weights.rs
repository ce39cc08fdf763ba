//! Weights for pallet-ard-token.
//!
//! Hand-estimated from the storage accesses of each call in its worst case
//! (a snapshot was taken since the touched values last changed). Replace with
//! `frame-benchmarking` output once the benchmarks run on reference hardware.

#![allow(unused_parens)]
#![allow(unused_imports)]

use core::marker::PhantomData;
use frame_support::{
    traits::Get,
    weights::{constants::RocksDbWeight, Weight},
};

pub trait WeightInfo {
    fn mint() -> Weight;
    fn transfer() -> Weight;
    fn transfer_from() -> Weight;
    fn approve() -> Weight;
    fn increase_allowance() -> Weight;
    fn decrease_allowance() -> Weight;
    fn burn() -> Weight;
    fn burn_from() -> Weight;
    fn grant_role() -> Weight;
    fn revoke_role() -> Weight;
    fn renounce_role() -> Weight;
    fn pause() -> Weight;
    fn unpause() -> Weight;
    fn set_blacklisted() -> Weight;
    fn snapshot() -> Weight;
}

/// Weights scaled by the runtime's database weights.
pub struct SubstrateWeight<T>(PhantomData<T>);

impl<T: frame_system::Config> WeightInfo for SubstrateWeight<T> {
    // Reads: Paused, Blacklisted, Roles, TotalSupply, Balances, CurrentSnapshotId,
    //        CheckpointCount x2, Checkpoints x2
    // Writes: TotalSupply, Balances, CheckpointCount x2, Checkpoints x2
    fn mint() -> Weight {
        Weight::from_parts(28_000_000, 3_600)
            .saturating_add(T::DbWeight::get().reads(10))
            .saturating_add(T::DbWeight::get().writes(6))
    }
    // Reads: Paused, Blacklisted x2, Balances x2, CurrentSnapshotId,
    //        CheckpointCount x2, Checkpoints x2
    // Writes: Balances x2, CheckpointCount x2, Checkpoints x2
    fn transfer() -> Weight {
        Weight::from_parts(30_000_000, 3_600)
            .saturating_add(T::DbWeight::get().reads(10))
            .saturating_add(T::DbWeight::get().writes(6))
    }
    fn transfer_from() -> Weight {
        Weight::from_parts(34_000_000, 3_600)
            .saturating_add(T::DbWeight::get().reads(11))
            .saturating_add(T::DbWeight::get().writes(7))
    }
    fn approve() -> Weight {
        Weight::from_parts(12_000_000, 0).saturating_add(T::DbWeight::get().writes(1))
    }
    fn increase_allowance() -> Weight {
        Weight::from_parts(13_000_000, 3_500)
            .saturating_add(T::DbWeight::get().reads(1))
            .saturating_add(T::DbWeight::get().writes(1))
    }
    fn decrease_allowance() -> Weight {
        Weight::from_parts(13_000_000, 3_500)
            .saturating_add(T::DbWeight::get().reads(1))
            .saturating_add(T::DbWeight::get().writes(1))
    }
    fn burn() -> Weight {
        Weight::from_parts(27_000_000, 3_600)
            .saturating_add(T::DbWeight::get().reads(9))
            .saturating_add(T::DbWeight::get().writes(6))
    }
    fn burn_from() -> Weight {
        Weight::from_parts(31_000_000, 3_600)
            .saturating_add(T::DbWeight::get().reads(10))
            .saturating_add(T::DbWeight::get().writes(7))
    }
    fn grant_role() -> Weight {
        Weight::from_parts(14_000_000, 3_500)
            .saturating_add(T::DbWeight::get().reads(3))
            .saturating_add(T::DbWeight::get().writes(1))
    }
    fn revoke_role() -> Weight {
        Weight::from_parts(14_000_000, 3_500)
            .saturating_add(T::DbWeight::get().reads(3))
            .saturating_add(T::DbWeight::get().writes(1))
    }
    fn renounce_role() -> Weight {
        Weight::from_parts(12_000_000, 3_500)
            .saturating_add(T::DbWeight::get().reads(1))
            .saturating_add(T::DbWeight::get().writes(1))
    }
    fn pause() -> Weight {
        Weight::from_parts(11_000_000, 3_500)
            .saturating_add(T::DbWeight::get().reads(2))
            .saturating_add(T::DbWeight::get().writes(1))
    }
    fn unpause() -> Weight {
        Weight::from_parts(11_000_000, 3_500)
            .saturating_add(T::DbWeight::get().reads(2))
            .saturating_add(T::DbWeight::get().writes(1))
    }
    fn set_blacklisted() -> Weight {
        Weight::from_parts(11_000_000, 3_500)
            .saturating_add(T::DbWeight::get().reads(1))
            .saturating_add(T::DbWeight::get().writes(1))
    }
    fn snapshot() -> Weight {
        Weight::from_parts(10_000_000, 1_500)
            .saturating_add(T::DbWeight::get().reads(2))
            .saturating_add(T::DbWeight::get().writes(1))
    }
}

// For backwards compatibility and tests.
impl WeightInfo for () {
    fn mint() -> Weight {
        Weight::from_parts(28_000_000, 3_600)
            .saturating_add(RocksDbWeight::get().reads(10))
            .saturating_add(RocksDbWeight::get().writes(6))
    }
    fn transfer() -> Weight {
        Weight::from_parts(30_000_000, 3_600)
            .saturating_add(RocksDbWeight::get().reads(10))
            .saturating_add(RocksDbWeight::get().writes(6))
    }
    fn transfer_from() -> Weight {
        Weight::from_parts(34_000_000, 3_600)
            .saturating_add(RocksDbWeight::get().reads(11))
            .saturating_add(RocksDbWeight::get().writes(7))
    }
    fn approve() -> Weight {
        Weight::from_parts(12_000_000, 0).saturating_add(RocksDbWeight::get().writes(1))
    }
    fn increase_allowance() -> Weight {
        Weight::from_parts(13_000_000, 3_500)
            .saturating_add(RocksDbWeight::get().reads(1))
            .saturating_add(RocksDbWeight::get().writes(1))
    }
    fn decrease_allowance() -> Weight {
        Weight::from_parts(13_000_000, 3_500)
            .saturating_add(RocksDbWeight::get().reads(1))
            .saturating_add(RocksDbWeight::get().writes(1))
    }
    fn burn() -> Weight {
        Weight::from_parts(27_000_000, 3_600)
            .saturating_add(RocksDbWeight::get().reads(9))
            .saturating_add(RocksDbWeight::get().writes(6))
    }
    fn burn_from() -> Weight {
        Weight::from_parts(31_000_000, 3_600)
            .saturating_add(RocksDbWeight::get().reads(10))
            .saturating_add(RocksDbWeight::get().writes(7))
    }
    fn grant_role() -> Weight {
        Weight::from_parts(14_000_000, 3_500)
            .saturating_add(RocksDbWeight::get().reads(3))
            .saturating_add(RocksDbWeight::get().writes(1))
    }
    fn revoke_role() -> Weight {
        Weight::from_parts(14_000_000, 3_500)
            .saturating_add(RocksDbWeight::get().reads(3))
            .saturating_add(RocksDbWeight::get().writes(1))
    }
    fn renounce_role() -> Weight {
        Weight::from_parts(12_000_000, 3_500)
            .saturating_add(RocksDbWeight::get().reads(1))
            .saturating_add(RocksDbWeight::get().writes(1))
    }
    fn pause() -> Weight {
        Weight::from_parts(11_000_000, 3_500)
            .saturating_add(RocksDbWeight::get().reads(2))
            .saturating_add(RocksDbWeight::get().writes(1))
    }
    fn unpause() -> Weight {
        Weight::from_parts(11_000_000, 3_500)
            .saturating_add(RocksDbWeight::get().reads(2))
            .saturating_add(RocksDbWeight::get().writes(1))
    }
    fn set_blacklisted() -> Weight {
        Weight::from_parts(11_000_000, 3_500)
            .saturating_add(RocksDbWeight::get().reads(1))
            .saturating_add(RocksDbWeight::get().writes(1))
    }
    fn snapshot() -> Weight {
        Weight::from_parts(10_000_000, 1_500)
            .saturating_add(RocksDbWeight::get().reads(2))
            .saturating_add(RocksDbWeight::get().writes(1))
    }
}
