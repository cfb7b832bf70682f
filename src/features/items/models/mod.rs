mod collected_item;
mod found_item;
mod lost_item;

pub use collected_item::CollectedItem;
pub use found_item::FoundItem;
pub use lost_item::LostItem;
