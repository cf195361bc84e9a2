//! Typed records returned by searches, statistics and rankings.

mod category;
mod post;
mod stats;
mod user;

pub use category::Category;
pub use post::Post;
pub use stats::PostStats;
pub use user::{RankedUser, User};
