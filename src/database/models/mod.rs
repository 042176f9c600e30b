pub mod assignment;
pub mod asset;
pub mod category;
pub mod contract;
pub mod employee;
pub mod inventory;
pub mod lookup;
pub mod spare;
pub mod user;

pub use assignment::{AssetAssignment, AssignedAsset, AssignedUser};
pub use asset::{Asset, AssetOption};
pub use category::{AssetCategory, CategoryOption};
pub use contract::Contract;
pub use employee::Employee;
pub use inventory::InventoryEntry;
pub use lookup::LookupRecord;
pub use spare::Spare;
pub use user::{User, UserOption};
