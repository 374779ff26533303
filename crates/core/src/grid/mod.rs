//! Grid storage: fields, the ingested landscape and the evolving state

mod fields;
mod landscape;
mod state;

pub use fields::FieldData;
pub use landscape::Landscape;
pub use state::GridState;
