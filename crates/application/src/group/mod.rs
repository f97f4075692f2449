mod notifier;
mod scanner;
mod tag_group;

pub use notifier::ChangeNotifier;
pub use tag_group::TagGroup;
