mod board;
mod card;
mod checklist;
mod comment;
mod invite;
mod label;
mod list;
mod user;

pub use board::*;
pub use card::*;
pub use checklist::*;
pub use comment::*;
pub use invite::*;
pub use label::*;
pub use list::*;
pub use user::*;

use serde::{Deserialize, Deserializer};

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`)
/// in PATCH bodies. Use together with `#[serde(default)]`.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
