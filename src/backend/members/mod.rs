pub mod model;
pub mod source;

pub use model::{Member, MemberField, MemberId};
pub use source::{HttpMemberSource, MemberSource, spawn_initial_load};
