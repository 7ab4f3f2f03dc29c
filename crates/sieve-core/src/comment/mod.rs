//! Comment module
//!
//! Comment model plus the classifier that decides which output set a
//! comment belongs to.

pub mod filter;
pub mod model;

pub use filter::{classify, partition, Classification, ClassifiedComments, Script, ScriptFilter};
pub use model::{Comment, CommentRecord};
