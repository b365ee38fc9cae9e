pub mod object;
pub mod state;
pub mod table;

pub use object::{GameObject, Item, ObjectKind, PickupItem};
pub use state::{MapState, ViewState};
pub use table::{ObjectTable, TrackedObject};
