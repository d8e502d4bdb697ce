pub mod paths;
#[cfg(feature = "native")]
pub mod notify;

#[cfg(feature = "native")]
pub use notify::{Change, TopicPattern, Watchers};
