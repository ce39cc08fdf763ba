//! Lazily recorded balance and supply checkpoints.
//!
//! Every tracked value (each account balance and the total supply) owns an
//! append-only sequence of [`Checkpoint`]s stored as
//! `Checkpoints[(tracked, index)]` with its length in `CheckpointCount`.
//! Snapshot ids inside a sequence are strictly increasing.
//!
//! Taking a snapshot only bumps `CurrentSnapshotId`. The first mutation of a
//! value after that appends `(current id, value before the mutation)`. A value
//! that never changed after snapshot `S` has no entry `>= S`, and its live
//! value is the answer for `S`.

use codec::{Decode, Encode, MaxEncodedLen};
use frame_support::{ensure, RuntimeDebug};
use scale_info::TypeInfo;
use sp_runtime::DispatchError;
use sp_std::prelude::*;

use crate::{Balances, CheckpointCount, Checkpoints, Config, CurrentSnapshotId, Error, Pallet, TotalSupply};

/// Snapshot identifier. `0` means no snapshot has been taken.
pub type SnapshotId = u32;

/// Value of a tracked quantity as of a snapshot.
#[derive(Encode, Decode, Clone, Copy, PartialEq, Eq, RuntimeDebug, TypeInfo, MaxEncodedLen)]
pub struct Checkpoint {
    pub snapshot_id: SnapshotId,
    pub value: u128,
}

/// A quantity whose history is kept.
#[derive(Encode, Decode, Clone, PartialEq, Eq, RuntimeDebug, TypeInfo, MaxEncodedLen)]
pub enum Tracked<AccountId> {
    Balance(AccountId),
    TotalSupply,
}

/// Index of the first entry whose snapshot id is `>= snapshot_id`, or `len`.
///
/// `id_at` must return strictly increasing ids for `0..len`.
pub fn lower_bound(
    len: u32,
    snapshot_id: SnapshotId,
    id_at: impl Fn(u32) -> SnapshotId,
) -> u32 {
    let (mut low, mut high) = (0u32, len);
    while low < high {
        let mid = low + (high - low) / 2;
        if id_at(mid) < snapshot_id {
            low = mid + 1;
        } else {
            high = mid;
        }
    }
    low
}

/// Whether a history ending at `last` must capture the value for `current`.
pub fn needs_checkpoint(last: Option<SnapshotId>, current: SnapshotId) -> bool {
    last.unwrap_or_default() < current
}

impl<T: Config> Pallet<T> {
    fn live_value(tracked: &Tracked<T::AccountId>) -> u128 {
        match tracked {
            Tracked::Balance(account) => Balances::<T>::get(account),
            Tracked::TotalSupply => TotalSupply::<T>::get(),
        }
    }

    /// Appends the pre-mutation value of `tracked` if the current snapshot
    /// has not captured it yet. Must run before the value changes.
    pub(crate) fn record_checkpoint(tracked: &Tracked<T::AccountId>) {
        let current = CurrentSnapshotId::<T>::get();
        let len = CheckpointCount::<T>::get(tracked);
        let last = len
            .checked_sub(1)
            .and_then(|index| Checkpoints::<T>::get(tracked, index))
            .map(|checkpoint| checkpoint.snapshot_id);

        if !needs_checkpoint(last, current) {
            return;
        }

        let checkpoint = Checkpoint { snapshot_id: current, value: Self::live_value(tracked) };
        Checkpoints::<T>::insert(tracked, len, checkpoint);
        CheckpointCount::<T>::insert(tracked, len.saturating_add(1));
    }

    /// Value of `tracked` as of `snapshot_id`.
    pub(crate) fn value_at(
        tracked: &Tracked<T::AccountId>,
        snapshot_id: SnapshotId,
    ) -> Result<u128, DispatchError> {
        ensure!(
            snapshot_id > 0 && snapshot_id <= CurrentSnapshotId::<T>::get(),
            Error::<T>::SnapshotIdNotYetTaken
        );

        let len = CheckpointCount::<T>::get(tracked);
        let index = lower_bound(len, snapshot_id, |i| {
            Checkpoints::<T>::get(tracked, i)
                .map(|checkpoint| checkpoint.snapshot_id)
                .unwrap_or(SnapshotId::MAX)
        });

        Ok(match Checkpoints::<T>::get(tracked, index) {
            Some(checkpoint) if index < len => checkpoint.value,
            _ => Self::live_value(tracked),
        })
    }

    /// Full checkpoint sequence of `tracked`, oldest first.
    pub fn checkpoint_history(tracked: &Tracked<T::AccountId>) -> Vec<Checkpoint> {
        (0..CheckpointCount::<T>::get(tracked))
            .filter_map(|index| Checkpoints::<T>::get(tracked, index))
            .collect()
    }
}
