use crate as pallet_ard_token;
use frame_support::{
    derive_impl, parameter_types,
    traits::{ConstU32, ConstU64},
};
use sp_core::H256;
use sp_runtime::{
    traits::{BlakeTwo256, IdentityLookup},
    BuildStorage,
};

type Block = frame_system::mocking::MockBlock<Test>;

// Configure a mock runtime to test the pallet.
frame_support::construct_runtime!(
    pub enum Test {
        System: frame_system,
        ArdToken: pallet_ard_token,
    }
);

#[derive_impl(frame_system::config_preludes::TestDefaultConfig)]
impl frame_system::Config for Test {
    type BaseCallFilter = frame_support::traits::Everything;
    type BlockWeights = ();
    type BlockLength = ();
    type DbWeight = ();
    type RuntimeOrigin = RuntimeOrigin;
    type RuntimeCall = RuntimeCall;
    type Nonce = u64;
    type Hash = H256;
    type Hashing = BlakeTwo256;
    type AccountId = u64;
    type Lookup = IdentityLookup<Self::AccountId>;
    type Block = Block;
    type RuntimeEvent = RuntimeEvent;
    type BlockHashCount = ConstU64<250>;
    type Version = ();
    type PalletInfo = PalletInfo;
    type AccountData = ();
    type OnNewAccount = ();
    type OnKilledAccount = ();
    type SystemWeightInfo = ();
    type SS58Prefix = ();
    type OnSetCode = ();
    type MaxConsumers = ConstU32<16>;
}

impl pallet_ard_token::Config for Test {
    type RuntimeEvent = RuntimeEvent;
    type WeightInfo = ();
}

/// One whole token in minor units (18 decimals).
pub const UNIT: u128 = 1_000_000_000_000_000_000;

parameter_types! {
    /// Deployer: holds the admin role and every operational role.
    pub const AdminAccount: u64 = 1;
}

pub const OWNER: u64 = 1;
pub const ACCOUNT2: u64 = 2;
pub const ACCOUNT3: u64 = 3;

// Build genesis storage according to the mock runtime: the deployer holds
// every role and 10 tokens, mirroring a fresh deployment followed by one mint.
pub fn new_test_ext() -> sp_io::TestExternalities {
    let mut t = frame_system::GenesisConfig::<Test>::default().build_storage().unwrap();

    pallet_ard_token::GenesisConfig::<Test> {
        admin: Some(AdminAccount::get()),
        token_name: b"ArdCoin".to_vec(),
        token_symbol: b"ARDX".to_vec(),
        decimals: 18,
        role_members: vec![],
        blacklisted_accounts: vec![],
        initial_balances: vec![(OWNER, 10 * UNIT)],
    }
    .assimilate_storage(&mut t)
    .unwrap();

    let mut ext = sp_io::TestExternalities::new(t);
    ext.execute_with(|| System::set_block_number(1));
    ext
}
