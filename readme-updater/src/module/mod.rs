pub mod card;
pub mod readme;
pub mod updater;

pub use card::CardBuilder;
pub use readme::DocumentAssembler;
pub use updater::{ReadmeUpdater, RunReport};
