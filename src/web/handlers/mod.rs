//! HTML template rendering handlers.

mod create;
mod index;

pub use create::{QrCodeCreatedTemplate, ShortLinkCreatedTemplate, create_handler};
pub use index::{IndexTemplate, index_handler};
